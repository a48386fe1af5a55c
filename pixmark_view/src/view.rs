// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::build::ViewConfig;
use crate::fit::{InvalidViewportError, ResolutionBounds, ViewportSize};
use crate::modes::ClampMode;

/// Constrained pan/zoom state of a pixel view attached to a viewport.
///
/// `PixelView` maps pixel-space world coordinates (y up) onto a viewport in
/// screen pixels (y down, origin top-left). Its state is a world-space center
/// and a resolution in world units per screen pixel. Zoom is clamped into the
/// fitted [`ResolutionBounds`], so the view never zooms out past the initial
/// fit, and the center is kept inside the image extent according to the
/// [`ClampMode`].
#[derive(Clone, Debug)]
pub struct PixelView {
    viewport: Size,
    extent: Rect,
    bounds: ResolutionBounds,
    center: Point,
    resolution: f64,
    clamp_mode: ClampMode,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl PixelView {
    /// Creates a view from a built configuration, positioned at its initial fit.
    pub fn new(config: &ViewConfig, viewport: ViewportSize) -> Result<Self, InvalidViewportError> {
        let viewport = viewport.validate()?;
        let mut view = Self {
            viewport: Size::new(viewport.width, viewport.height),
            extent: config.projection.extent(),
            bounds: config.resolutions,
            center: config.center,
            resolution: config.resolutions.initial,
            clamp_mode: ClampMode::default(),
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        view.clamp_center();
        view.rebuild_transforms();
        Ok(view)
    }

    /// Returns the viewport size in screen pixels.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Returns the image extent in world coordinates.
    #[must_use]
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Returns the resolution bounds the view is constrained to.
    #[must_use]
    pub fn resolution_bounds(&self) -> ResolutionBounds {
        self.bounds
    }

    /// Returns the current resolution in world units per screen pixel.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the world-space point shown at the viewport center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the clamp mode, re-applying it to the current center.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            self.clamp_center();
            self.rebuild_transforms();
        }
    }

    /// Sets the resolution, clamping it into the configured bounds.
    pub fn set_resolution(&mut self, resolution: f64) {
        if !resolution.is_finite() || resolution <= 0.0 {
            return;
        }
        let clamped = self.bounds.clamp(resolution);
        if (self.resolution - clamped).abs() < f64::EPSILON {
            return;
        }
        self.resolution = clamped;
        self.rebuild_transforms();
    }

    /// Moves the view center to `world_pt`, subject to clamping.
    pub fn center_on(&mut self, world_pt: Point) {
        self.center = world_pt;
        self.clamp_center();
        self.rebuild_transforms();
    }

    /// Drags the image content by `delta` screen pixels.
    ///
    /// Dragging right reveals content further left, so the center moves the
    /// opposite way in world space.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.center.x -= delta.x * self.resolution;
        self.center.y += delta.y * self.resolution;
        self.clamp_center();
        self.rebuild_transforms();
    }

    /// Zooms by `factor` around an anchor in screen coordinates.
    ///
    /// A factor above `1.0` zooms in (lowers the resolution). The world point
    /// under the anchor stays fixed unless clamping has to move the center.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_resolution = self.bounds.clamp(self.resolution / factor);
        if (new_resolution - self.resolution).abs() < f64::EPSILON {
            return;
        }

        let anchor_world = self.view_to_world_point(anchor_view);
        let offset = anchor_view - self.view_center();
        self.resolution = new_resolution;
        self.center = Point::new(
            anchor_world.x - offset.x * new_resolution,
            anchor_world.y + offset.y * new_resolution,
        );
        self.clamp_center();
        self.rebuild_transforms();
    }

    /// Restores the initial fit: extent center at the initial resolution.
    pub fn reset(&mut self) {
        self.center = self.extent.center();
        self.resolution = self.bounds.initial;
        self.clamp_center();
        self.rebuild_transforms();
    }

    /// Returns the world-space rectangle currently visible through the viewport.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        let half = Vec2::new(
            self.viewport.width * 0.5 * self.resolution,
            self.viewport.height * 0.5 * self.resolution,
        );
        Rect::from_points(self.center - half, self.center + half)
    }

    /// Converts a world-space point into screen coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a screen-space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Returns the world-to-screen transform.
    #[must_use]
    pub fn world_to_view(&self) -> Affine {
        self.world_to_view
    }

    /// Snapshot of the current view state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PixelViewDebugInfo {
        PixelViewDebugInfo {
            viewport: self.viewport,
            extent: self.extent,
            visible_world_rect: self.visible_world_rect(),
            center: self.center,
            resolution: self.resolution,
            bounds: self.bounds,
            clamp_mode: self.clamp_mode,
        }
    }

    fn view_center(&self) -> Point {
        Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5)
    }

    fn rebuild_transforms(&mut self) {
        let res = self.resolution;
        let inv = 1.0 / res;
        let view_center = self.view_center().to_vec2();
        let center = self.center.to_vec2();
        // Translate the center to the origin, scale with a y flip, then move into the viewport.
        self.world_to_view = Affine::translate(view_center)
            * Affine::scale_non_uniform(inv, -inv)
            * Affine::translate(-center);
        // Built directly rather than inverted so view points map back exactly.
        self.view_to_world = Affine::translate(center)
            * Affine::scale_non_uniform(res, -res)
            * Affine::translate(-view_center);
    }

    fn clamp_center(&mut self) {
        if self.clamp_mode == ClampMode::None {
            return;
        }
        let e = self.extent;
        self.center = Point::new(
            self.center.x.clamp(e.min_x(), e.max_x()),
            self.center.y.clamp(e.min_y(), e.max_y()),
        );
    }
}

/// Debug snapshot of a [`PixelView`] state.
#[derive(Clone, Copy, Debug)]
pub struct PixelViewDebugInfo {
    /// Viewport size in screen pixels.
    pub viewport: Size,
    /// Image extent in world coordinates.
    pub extent: Rect,
    /// World-space rectangle currently visible.
    pub visible_world_rect: Rect,
    /// Current world-space center.
    pub center: Point,
    /// Current resolution.
    pub resolution: f64,
    /// Resolution bounds.
    pub bounds: ResolutionBounds,
    /// Clamp mode for the center.
    pub clamp_mode: ClampMode,
}
