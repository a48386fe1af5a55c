// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-point draw interaction.
//!
//! ## Usage
//!
//! 1) Get a [`DrawPoint`] from the pipeline that owns the target source.
//! 2) Feed pointer events in view coordinates:
//!    [`DrawPoint::pointer_down`], [`DrawPoint::pointer_move`] and
//!    [`DrawPoint::pointer_up`].
//! 3) A down/up pair that stays within the click tolerance adds one unlabeled
//!    point at the release position. Moving further turns the gesture into a
//!    pan, and nothing is drawn.

use core::fmt;

use kurbo::{Point, Rect};
use pixmark_index::{Backend, covers};
use pixmark_view::PixelView;

use crate::feature::PointId;
use crate::source::{PointSource, SourceId};

/// Default click tolerance in view pixels.
pub const DEFAULT_CLICK_TOLERANCE: f64 = 6.0;

/// What to do with a point drawn outside the image extent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutOfExtent {
    /// Add it where it was drawn.
    #[default]
    Allow,
    /// Refuse it with [`DrawError::OutOfExtent`].
    Reject,
    /// Move it to the nearest point of the extent.
    Clamp,
}

/// Draw interaction parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawOptions {
    /// Maximum pointer travel, in view pixels, for a gesture to count as a click.
    pub click_tolerance: f64,
    /// Policy for points outside the image extent.
    pub out_of_extent: OutOfExtent,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
            out_of_extent: OutOfExtent::Allow,
        }
    }
}

/// Errors produced when completing a draw gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawError {
    /// The handle was used against a source it is not bound to.
    SourceMismatch {
        /// Source the handle is bound to.
        expected: SourceId,
        /// Source it was used with.
        found: SourceId,
    },
    /// The point lies outside the image extent under [`OutOfExtent::Reject`].
    OutOfExtent {
        /// World-space position of the refused point.
        point: Point,
    },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceMismatch { expected, found } => write!(
                f,
                "draw handle bound to source {expected:?} used with source {found:?}"
            ),
            Self::OutOfExtent { point } => {
                write!(f, "point ({}, {}) lies outside the image", point.x, point.y)
            }
        }
    }
}

impl core::error::Error for DrawError {}

/// Handle for drawing new points into one specific [`PointSource`].
#[derive(Clone, Debug)]
pub struct DrawPoint {
    source: SourceId,
    options: DrawOptions,
    down: Option<Point>,
}

impl DrawPoint {
    /// Binds a draw handle to `source`.
    #[must_use]
    pub fn new(source: SourceId, options: DrawOptions) -> Self {
        Self {
            source,
            options,
            down: None,
        }
    }

    /// Source this handle writes to.
    #[must_use]
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Returns the interaction parameters.
    #[must_use]
    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    /// Returns `true` between a pointer down and its matching up or cancel.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.down.is_some()
    }

    /// Starts a gesture at `view_pt`, replacing any pending one.
    pub fn pointer_down(&mut self, view_pt: Point) {
        self.down = Some(view_pt);
    }

    /// Tracks pointer travel; returns `false` once the gesture is no longer a click.
    pub fn pointer_move(&mut self, view_pt: Point) -> bool {
        let Some(down) = self.down else {
            return false;
        };
        if self.exceeds_tolerance(down, view_pt) {
            self.down = None;
            return false;
        }
        true
    }

    /// Abandons the pending gesture.
    pub fn cancel(&mut self) {
        self.down = None;
    }

    /// Completes the gesture at `view_pt`.
    ///
    /// Returns the id of the new point, or `None` if no click was in progress.
    /// The gesture ends even when the source is refused.
    pub fn pointer_up<B: Backend>(
        &mut self,
        view_pt: Point,
        view: &PixelView,
        source: &mut PointSource<B>,
    ) -> Result<Option<PointId>, DrawError> {
        let down = self.down.take();
        self.check_source(source)?;
        let Some(down) = down else {
            return Ok(None);
        };
        if self.exceeds_tolerance(down, view_pt) {
            return Ok(None);
        }
        let world = view.view_to_world_point(view_pt);
        self.draw_at(world, view.extent(), source).map(Some)
    }

    /// Adds an unlabeled point at `world_pt`, applying the out-of-extent policy.
    pub fn draw_at<B: Backend>(
        &self,
        world_pt: Point,
        extent: Rect,
        source: &mut PointSource<B>,
    ) -> Result<PointId, DrawError> {
        self.check_source(source)?;
        let point = if covers(&extent, world_pt) {
            world_pt
        } else {
            match self.options.out_of_extent {
                OutOfExtent::Allow => world_pt,
                OutOfExtent::Reject => return Err(DrawError::OutOfExtent { point: world_pt }),
                OutOfExtent::Clamp => Point::new(
                    world_pt.x.clamp(extent.min_x(), extent.max_x()),
                    world_pt.y.clamp(extent.min_y(), extent.max_y()),
                ),
            }
        };
        let id = source.add(point, None);
        tracing::debug!(id = id.get(), x = point.x, y = point.y, "point drawn");
        Ok(id)
    }

    fn check_source<B: Backend>(&self, source: &PointSource<B>) -> Result<(), DrawError> {
        if source.id() == self.source {
            Ok(())
        } else {
            Err(DrawError::SourceMismatch {
                expected: self.source,
                found: source.id(),
            })
        }
    }

    fn exceeds_tolerance(&self, down: Point, pt: Point) -> bool {
        let tol = self.options.click_tolerance.max(0.0);
        (pt - down).hypot2() > tol * tol
    }
}
