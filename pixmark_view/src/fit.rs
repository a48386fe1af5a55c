// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution fitting: derive a pixel extent and zoom bounds from image and viewport sizes.

use core::fmt;

use kurbo::Rect;

/// Natural dimensions of a loaded raster image, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Creates a new image size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the full pixel extent `[0, 0, width, height]` of the image.
    #[must_use]
    pub fn extent(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Rendered dimensions of the viewport container, in screen pixels.
///
/// These are captured once; resizing the container does not re-derive a fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    /// Rendered width in screen pixels.
    pub width: f64,
    /// Rendered height in screen pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Creates a new viewport size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Checks that both dimensions are finite and strictly positive.
    pub fn validate(self) -> Result<Self, InvalidViewportError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(InvalidViewportError {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Error returned when a viewport has zero, negative, or non-finite dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidViewportError {
    /// The rejected width.
    pub width: f64,
    /// The rejected height.
    pub height: f64,
}

impl fmt::Display for InvalidViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "viewport {}x{} has no usable area; both dimensions must be finite and positive",
            self.width, self.height
        )
    }
}

impl core::error::Error for InvalidViewportError {}

/// Which image axis drives the initial fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Width exceeds height; the image is fitted to the viewport width.
    Wide,
    /// Height is at least the width; the image is fitted to the viewport height.
    Narrow,
}

/// Minimum resolution for images wider than the viewport: zoom in up to native pixels.
pub const NATIVE_MIN_RESOLUTION: f64 = 1.0;

/// Minimum resolution for images no wider than the viewport: zoom in up to 2x native.
pub const MAGNIFIED_MIN_RESOLUTION: f64 = 0.5;

/// Zoom bounds expressed as resolutions (world units per screen pixel).
///
/// Lower resolution means more zoomed in. `max` always equals `initial`, so a
/// view can never be zoomed out past its fitted state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolutionBounds {
    /// Resolution of the initial, fitted view.
    pub initial: f64,
    /// Smallest allowed resolution (deepest zoom-in).
    pub min: f64,
    /// Largest allowed resolution (furthest zoom-out).
    pub max: f64,
}

impl ResolutionBounds {
    /// Clamps a resolution into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, resolution: f64) -> f64 {
        resolution.clamp(self.min, self.max)
    }
}

/// Result of fitting an image into a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Pixel extent of the image, always `[0, 0, width, height]`.
    pub extent: Rect,
    /// Axis that drove the fit.
    pub orientation: Orientation,
    /// Non-negative scale-down ratio in resolution units.
    pub ratio: f64,
    /// Derived zoom bounds.
    pub resolutions: ResolutionBounds,
}

/// Computes the pixel extent and resolution bounds for showing `image` in `viewport`.
///
/// Wide images (`width > height`) are fitted to the viewport width, all others
/// to the viewport height. When the fitted dimension already fits, the ratio is
/// zero and the image is shown at native resolution.
///
/// ```rust
/// use pixmark_view::{ImageSize, Orientation, ViewportSize, compute_fit};
///
/// let fit = compute_fit(ImageSize::new(2000, 1000), ViewportSize::new(800.0, 600.0)).unwrap();
/// assert_eq!(fit.orientation, Orientation::Wide);
/// assert_eq!(fit.resolutions.initial, 2.5);
/// assert_eq!(fit.resolutions.max, 2.5);
/// assert_eq!(fit.resolutions.min, 1.0);
/// ```
pub fn compute_fit(image: ImageSize, viewport: ViewportSize) -> Result<Fit, InvalidViewportError> {
    let viewport = viewport.validate()?;
    let width = f64::from(image.width);
    let height = f64::from(image.height);

    let orientation = if image.width > image.height {
        Orientation::Wide
    } else {
        Orientation::Narrow
    };

    // Scaling down means zooming out, which raises the resolution; never negative.
    let ratio = match orientation {
        Orientation::Wide => ((width - viewport.width) / viewport.width).max(0.0),
        Orientation::Narrow => ((height - viewport.height) / viewport.height).max(0.0),
    };

    let initial = 1.0 + ratio;
    let min = if width > viewport.width {
        NATIVE_MIN_RESOLUTION
    } else {
        MAGNIFIED_MIN_RESOLUTION
    };

    Ok(Fit {
        extent: image.extent(),
        orientation,
        ratio,
        resolutions: ResolutionBounds {
            initial,
            min,
            max: initial,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(w: u32, h: u32, vw: f64, vh: f64) -> Fit {
        compute_fit(ImageSize::new(w, h), ViewportSize::new(vw, vh)).unwrap()
    }

    #[test]
    fn wide_oversized_image_scales_down_to_width() {
        let f = fit(2000, 1000, 800.0, 600.0);
        assert_eq!(f.orientation, Orientation::Wide);
        assert!((f.ratio - 1.5).abs() < 1e-12, "ratio should be 1.5");
        assert!((f.resolutions.initial - 2.5).abs() < 1e-12, "initial should be 2.5");
        assert_eq!(f.resolutions.max, f.resolutions.initial);
        assert_eq!(f.resolutions.min, 1.0);
        assert_eq!(f.extent, Rect::new(0.0, 0.0, 2000.0, 1000.0));
    }

    #[test]
    fn small_wide_image_keeps_native_resolution() {
        let f = fit(400, 300, 800.0, 600.0);
        assert_eq!(f.orientation, Orientation::Wide);
        assert_eq!(f.ratio, 0.0);
        assert_eq!(f.resolutions.initial, 1.0);
        assert_eq!(f.resolutions.max, 1.0);
        assert_eq!(f.resolutions.min, 0.5);
    }

    #[test]
    fn tall_image_fits_to_height() {
        let f = fit(500, 1800, 800.0, 600.0);
        assert_eq!(f.orientation, Orientation::Narrow);
        assert!((f.ratio - 2.0).abs() < 1e-12, "ratio should be (1800 - 600) / 600");
        assert!((f.resolutions.initial - 3.0).abs() < 1e-12, "initial should be 3.0");
        // Not wider than the viewport, so 2x zoom-in is allowed.
        assert_eq!(f.resolutions.min, 0.5);
    }

    #[test]
    fn square_image_counts_as_narrow() {
        let f = fit(700, 700, 800.0, 600.0);
        assert_eq!(f.orientation, Orientation::Narrow);
        assert!(f.ratio > 0.0, "700 tall does not fit 600 high");
    }

    #[test]
    fn tall_but_wider_than_viewport_uses_native_min() {
        // Narrow orientation, yet wider than the container.
        let f = fit(900, 1200, 800.0, 1500.0);
        assert_eq!(f.orientation, Orientation::Narrow);
        assert_eq!(f.ratio, 0.0);
        assert_eq!(f.resolutions.min, 1.0);
        assert_eq!(f.resolutions.initial, 1.0);
    }

    #[test]
    fn max_always_equals_initial_and_min_never_exceeds_it() {
        let viewports = [(800.0, 600.0), (320.0, 240.0), (1920.0, 1080.0), (10.0, 4000.0)];
        for w in (1..5000).step_by(373) {
            for h in (1..5000).step_by(419) {
                for (vw, vh) in viewports {
                    let f = fit(w, h, vw, vh);
                    let r = f.resolutions;
                    assert_eq!(r.max, r.initial, "max must equal initial");
                    assert!(r.min <= r.initial, "min must not exceed initial");
                    assert!(f.ratio >= 0.0, "ratio must be non-negative");
                    let expected_min = if f64::from(w) > vw { 1.0 } else { 0.5 };
                    assert_eq!(r.min, expected_min);
                    if f.orientation == Orientation::Wide && f64::from(w) > vw {
                        assert!(r.initial > 1.0, "oversized wide image must scale down");
                    }
                }
            }
        }
    }

    #[test]
    fn degenerate_viewports_are_rejected() {
        let image = ImageSize::new(100, 100);
        for (w, h) in [
            (0.0, 600.0),
            (800.0, 0.0),
            (-1.0, 600.0),
            (800.0, f64::NAN),
            (f64::INFINITY, 600.0),
        ] {
            let err = compute_fit(image, ViewportSize::new(w, h));
            assert!(err.is_err(), "viewport {w}x{h} must be rejected");
        }
    }

    #[test]
    fn resolution_bounds_clamp() {
        let r = fit(2000, 1000, 800.0, 600.0).resolutions;
        assert_eq!(r.clamp(10.0), 2.5);
        assert_eq!(r.clamp(0.1), 1.0);
        assert_eq!(r.clamp(1.7), 1.7);
    }
}
