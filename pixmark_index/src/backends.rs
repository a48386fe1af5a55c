// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete [`Backend`](crate::Backend) implementations.

mod flatvec;
#[cfg(feature = "backend_grid")]
mod grid;

pub use flatvec::FlatVec;
#[cfg(feature = "backend_grid")]
pub use grid::{DEFAULT_CELL_SIZE, Grid};
