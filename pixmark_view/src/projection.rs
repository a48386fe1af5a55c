// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::Rect;

static NEXT_CODE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a pixel projection.
///
/// Codes carry no meaning beyond being distinct per built image view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectionCode(u64);

impl ProjectionCode {
    /// Allocates a fresh code, distinct from every previously allocated one.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_CODE.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pixels:{}", self.0)
    }
}

/// Flat, pixel-unit coordinate system covering a single image.
///
/// World coordinates are image pixels with the origin at the extent minimum.
/// Unlike view space, world `y` grows upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelProjection {
    code: ProjectionCode,
    extent: Rect,
}

impl PixelProjection {
    /// Creates a projection with a fresh code over `extent`.
    #[must_use]
    pub fn new(extent: Rect) -> Self {
        Self {
            code: ProjectionCode::next(),
            extent,
        }
    }

    /// Returns the projection's unique code.
    #[must_use]
    pub fn code(&self) -> ProjectionCode {
        self.code
    }

    /// Returns the projection extent.
    #[must_use]
    pub fn extent(&self) -> Rect {
        self.extent
    }
}
