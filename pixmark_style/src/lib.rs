// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixmark Style: immutable style descriptors for annotation layers.
//!
//! Styles here are plain data. A rendering backend reads them; nothing in this
//! crate draws. Two families are provided:
//!
//! - **Cluster badges**: a filled circle with a count in the middle, built by
//!   [`ClusterStyleOptions::build`] and memoized per count by [`StyleCache`].
//! - **Label boxes**: text on a padded, outlined background, described once by
//!   [`TextBoxStyle`] and combined with per-feature text via
//!   [`TextBoxStyle::with_text`].
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//! use pixmark_style::StyleCache;
//!
//! let mut cache = StyleCache::new();
//! let size = NonZeroUsize::new(3).unwrap();
//! let three = cache.style_for(size);
//! assert!(Arc::ptr_eq(&three, &cache.style_for(size)));
//! assert_eq!(three.text.as_ref().unwrap().text, "3");
//! ```
//!
//! Colors are [`peniko::Color`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod options;
mod style;

pub use cache::StyleCache;
pub use options::{ClusterStyleOptions, TextBoxOptions, TextBoxStyle};
pub use peniko::Color;
pub use style::{
    CircleMarker, Font, FontWeight, Padding, StrokeStyle, Style, TextBackground, TextStyle,
};
