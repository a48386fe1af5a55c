// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport building: turn a fit into a view configuration plus a static image layer.

use alloc::string::String;

use kurbo::{Point, Rect};

use crate::fit::{Fit, ImageSize, InvalidViewportError, ResolutionBounds, ViewportSize};
use crate::projection::PixelProjection;
use crate::view::PixelView;

/// A loaded raster image: where it came from and its natural size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageSource {
    /// URL or path the image was loaded from.
    pub url: String,
    /// Natural dimensions in pixels.
    pub size: ImageSize,
}

impl ImageSource {
    /// Creates a new image source description.
    #[must_use]
    pub fn new(url: impl Into<String>, size: ImageSize) -> Self {
        Self {
            url: url.into(),
            size,
        }
    }
}

/// Configuration consumed by a rendering engine's view primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Pixel coordinate system of the view.
    pub projection: PixelProjection,
    /// Initial view center, the center of the extent.
    pub center: Point,
    /// Initial, minimum, and maximum resolutions.
    pub resolutions: ResolutionBounds,
}

/// Static image layer spanning the whole projection extent.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    /// Image URL or path.
    pub url: String,
    /// World-space rectangle the image is stretched over.
    pub extent: Rect,
    /// Projection the extent is expressed in.
    pub projection: PixelProjection,
}

/// A renderable, not-yet-attached view over a single image.
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    config: ViewConfig,
    base: ImageLayer,
}

impl MapView {
    /// Returns the view configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the base image layer.
    #[must_use]
    pub fn base_layer(&self) -> &ImageLayer {
        &self.base
    }

    /// Returns the projection shared by the view and its layers.
    #[must_use]
    pub fn projection(&self) -> &PixelProjection {
        &self.config.projection
    }

    /// Attaches the view to a concrete viewport, producing an interactive pan/zoom model.
    pub fn attach(&self, viewport: ViewportSize) -> Result<PixelView, InvalidViewportError> {
        PixelView::new(&self.config, viewport)
    }
}

/// Builds a view over `image` from a previously computed `fit`.
///
/// This only constructs configuration; attaching to a display target is up to
/// the caller (see [`MapView::attach`]).
#[must_use]
pub fn build_view(image: &ImageSource, fit: &Fit) -> MapView {
    debug_assert_eq!(
        fit.extent,
        image.size.extent(),
        "fit must be computed from this image's natural size"
    );
    let projection = PixelProjection::new(fit.extent);
    tracing::debug!(
        code = %projection.code(),
        width = image.size.width,
        height = image.size.height,
        initial = fit.resolutions.initial,
        "built image view"
    );
    MapView {
        config: ViewConfig {
            projection,
            center: fit.extent.center(),
            resolutions: fit.resolutions,
        },
        base: ImageLayer {
            url: image.url.clone(),
            extent: fit.extent,
            projection,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::compute_fit;

    #[test]
    fn built_view_is_centered_and_shares_projection() {
        let image = ImageSource::new("scan.png", ImageSize::new(2000, 1000));
        let fit = compute_fit(image.size, ViewportSize::new(800.0, 600.0)).unwrap();
        let map = build_view(&image, &fit);

        assert_eq!(map.config().center, Point::new(1000.0, 500.0));
        assert_eq!(map.config().resolutions, fit.resolutions);
        assert_eq!(map.base_layer().extent, fit.extent);
        assert_eq!(map.base_layer().url, "scan.png");
        assert_eq!(map.base_layer().projection.code(), map.projection().code());
        assert_eq!(map.projection().extent(), fit.extent);
    }

    #[test]
    fn each_build_gets_a_distinct_projection() {
        let image = ImageSource::new("a.png", ImageSize::new(10, 10));
        let fit = compute_fit(image.size, ViewportSize::new(10.0, 10.0)).unwrap();
        let a = build_view(&image, &fit);
        let b = build_view(&image, &fit);
        assert_ne!(a.projection().code(), b.projection().code());
    }

    #[test]
    fn attach_rejects_empty_viewport() {
        let image = ImageSource::new("a.png", ImageSize::new(10, 10));
        let fit = compute_fit(image.size, ViewportSize::new(10.0, 10.0)).unwrap();
        let map = build_view(&image, &fit);
        assert!(map.attach(ViewportSize::new(0.0, 0.0)).is_err());
        assert!(map.attach(ViewportSize::new(10.0, 10.0)).is_ok());
    }
}
