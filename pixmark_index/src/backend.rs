// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for point indexing implementations.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

/// Spatial backend abstraction over slot-addressed points.
///
/// Slots are small dense integers chosen by the caller (typically the
/// position of a feature in its owning collection). A slot holds at most one
/// point at a time.
pub trait Backend: Debug {
    /// Insert a point into `slot`, replacing any point already there.
    fn insert(&mut self, slot: usize, point: Point);

    /// Remove the point in `slot`, if any.
    fn remove(&mut self, slot: usize);

    /// Clear all points.
    fn clear(&mut self);

    /// Number of live points.
    fn len(&self) -> usize;

    /// Returns `true` if the backend holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit slots whose point lies inside `rect`, edges included.
    ///
    /// Visiting order is backend-specific.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// Query slots whose point lies inside `rect`. Default: collects `visit_rect`.
    fn query_rect<'a>(&'a self, rect: Rect) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        self.visit_rect(rect, |i| out.push(i));
        Box::new(out.into_iter())
    }
}

/// Returns `true` if `point` lies inside `rect`, including its edges.
///
/// [`Rect::contains`] excludes the maximum edges, which would make queries
/// asymmetric around a point.
#[inline]
pub fn covers(rect: &Rect, point: Point) -> bool {
    point.x >= rect.min_x()
        && point.x <= rect.max_x()
        && point.y >= rect.min_y()
        && point.y <= rect.max_y()
}
