// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixmark Index: a small spatial index over slot-addressed points.
//!
//! Annotation layers need one spatial question answered quickly: "which
//! points lie inside this rectangle?". This crate answers it behind the
//! [`Backend`] trait so callers can pick a strategy to fit their workload:
//!
//! - [`backends::FlatVec`]: linear scans over a dense vector. Smallest and
//!   simplest; fine for a few dozen points.
//! - [`backends::Grid`] (feature `backend_grid`, on by default): a uniform
//!   hash grid. Queries touch only the overlapped cells.
//!
//! Query rectangles include their edges, so a square of half-width `d`
//! around a point finds every neighbor whose per-axis distance is at most
//! `d`.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use pixmark_index::Backend;
//! use pixmark_index::backends::FlatVec;
//!
//! let mut index = FlatVec::default();
//! index.insert(0, Point::new(10.0, 10.0));
//! index.insert(1, Point::new(90.0, 90.0));
//!
//! let hits: Vec<usize> = index.query_rect(Rect::new(0.0, 0.0, 50.0, 50.0)).collect();
//! assert_eq!(hits, [0]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;

pub use backend::{Backend, covers};
