// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixmark View: pixel-space image fitting and constrained pan/zoom.
//!
//! This crate turns an image's natural size and a viewport's rendered size
//! into everything a rendering engine needs to show the image:
//! - A flat, pixel-unit coordinate system ([`PixelProjection`]) whose extent
//!   is exactly `[0, 0, width, height]`.
//! - Resolution bounds ([`ResolutionBounds`]) that fit the image on first
//!   display and never allow zooming out past that fit.
//! - A view configuration plus a full-extent static image layer
//!   ([`MapView`]).
//! - A headless pan/zoom model ([`PixelView`]) that respects those bounds and
//!   keeps the image on screen.
//!
//! It does **not** rasterize anything. Callers hand [`ViewConfig`] and
//! [`ImageLayer`] to whatever canvas backend they use and feed input events
//! into [`PixelView`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pixmark_view::{ImageSize, ImageSource, ViewportSize, build_view, compute_fit};
//!
//! let image = ImageSource::new("scan.png", ImageSize::new(2000, 1000));
//! let viewport = ViewportSize::new(800.0, 600.0);
//!
//! let fit = compute_fit(image.size, viewport).unwrap();
//! let map = build_view(&image, &fit);
//! let mut view = map.attach(viewport).unwrap();
//!
//! // Zooming out further than the initial fit is not possible.
//! view.zoom_about_view_point(Point::new(400.0, 300.0), 0.5);
//! assert_eq!(view.resolution(), fit.resolutions.initial);
//! ```
//!
//! ## Fitting rules
//!
//! - Images wider than tall are fitted to the viewport width, all others to
//!   its height.
//! - The initial resolution is `1 + ratio`, where `ratio` is how much the
//!   fitted dimension overflows the viewport (never negative).
//! - Images wider than the viewport can be zoomed in to native pixels
//!   (resolution `1.0`); others to 2x native (resolution `0.5`).
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod build;
mod fit;
mod modes;
mod projection;
mod view;

pub use build::{ImageLayer, ImageSource, MapView, ViewConfig, build_view};
pub use fit::{
    Fit, ImageSize, InvalidViewportError, MAGNIFIED_MIN_RESOLUTION, NATIVE_MIN_RESOLUTION,
    Orientation, ResolutionBounds, ViewportSize, compute_fit,
};
pub use modes::ClampMode;
pub use projection::{PixelProjection, ProjectionCode};
pub use view::{PixelView, PixelViewDebugInfo};
