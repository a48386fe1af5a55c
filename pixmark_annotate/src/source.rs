// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::{Point, Rect};
use pixmark_index::Backend;
use pixmark_index::backends::Grid;

use crate::feature::{PointAnnotation, PointId};

static NEXT_SOURCE: AtomicU32 = AtomicU32::new(1);

/// Process-unique identity of a [`PointSource`].
///
/// Draw handles and layer caches use it to tell sources apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(u32);

impl SourceId {
    fn next() -> Self {
        Self(NEXT_SOURCE.fetch_add(1, Ordering::Relaxed))
    }
}

/// The shared collection of point annotations.
///
/// A source owns its annotations for the whole session; they are only ever
/// added. Every add bumps the [`revision`](Self::revision), which layers use
/// to decide when to re-evaluate.
///
/// Points are indexed by a spatial [`Backend`] so neighborhood queries stay
/// cheap as the set grows.
#[derive(Debug)]
pub struct PointSource<B: Backend = Grid> {
    id: SourceId,
    features: Vec<PointAnnotation>,
    index: B,
    revision: u64,
}

impl PointSource<Grid> {
    /// Creates an empty source backed by a default [`Grid`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Grid::default())
    }

    /// Creates an empty source backed by a [`Grid`] with the given cell size.
    #[must_use]
    pub fn with_cell_size(cell_size: f64) -> Self {
        Self::with_backend(Grid::new(cell_size))
    }
}

impl Default for PointSource<Grid> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> PointSource<B> {
    /// Creates an empty source over the given backend, clearing anything it holds.
    #[must_use]
    pub fn with_backend(mut index: B) -> Self {
        index.clear();
        Self {
            id: SourceId::next(),
            features: Vec::new(),
            index,
            revision: 0,
        }
    }

    /// Returns this source's identity.
    #[must_use]
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Returns the revision counter; it increases on every add.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the source holds no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns all annotations in insertion order.
    #[must_use]
    pub fn features(&self) -> &[PointAnnotation] {
        &self.features
    }

    /// Iterates over all annotations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PointAnnotation> + '_ {
        self.features.iter()
    }

    /// Looks up an annotation by id.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&PointAnnotation> {
        let slot = usize::try_from(id.0.checked_sub(1)?).ok()?;
        self.features.get(slot).filter(|f| f.id() == id)
    }

    /// Adds an annotation at `position` and returns its new id.
    pub fn add(&mut self, position: Point, label: Option<String>) -> PointId {
        let slot = self.features.len();
        let id = PointId(slot as u64 + 1);
        self.index.insert(slot, position);
        self.features.push(PointAnnotation::new(id, position, label));
        self.revision += 1;
        tracing::debug!(
            id = id.0,
            x = position.x,
            y = position.y,
            revision = self.revision,
            "point added"
        );
        id
    }

    /// Adds an unlabeled annotation.
    pub fn add_point(&mut self, position: Point) -> PointId {
        self.add(position, None)
    }

    /// Adds a labeled annotation.
    pub fn add_labeled(&mut self, position: Point, label: impl Into<String>) -> PointId {
        self.add(position, Some(label.into()))
    }

    /// Visits annotations whose position lies inside `rect` (edges included).
    ///
    /// Visiting order follows the backend.
    pub fn visit_rect<F: FnMut(usize, &PointAnnotation)>(&self, rect: Rect, mut f: F) {
        self.index.visit_rect(rect, |slot| {
            if let Some(feature) = self.features.get(slot) {
                f(slot, feature);
            }
        });
    }

    /// Returns annotations inside `rect` in insertion order.
    #[must_use]
    pub fn features_in_rect(&self, rect: Rect) -> Vec<&PointAnnotation> {
        let mut slots = Vec::new();
        self.index.visit_rect(rect, |slot| slots.push(slot));
        slots.sort_unstable();
        slots
            .into_iter()
            .filter_map(|slot| self.features.get(slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};
    use pixmark_index::backends::FlatVec;

    use super::PointSource;

    #[test]
    fn ids_are_sequential_and_revision_tracks_adds() {
        let mut source = PointSource::new();
        assert!(source.is_empty());
        assert_eq!(source.revision(), 0);

        let a = source.add_point(Point::new(1.0, 2.0));
        let b = source.add_labeled(Point::new(3.0, 4.0), "hello");
        assert_eq!((a.get(), b.get()), (1, 2));
        assert_eq!(source.revision(), 2);
        assert_eq!(source.len(), 2);

        assert_eq!(source.get(a).map(|f| f.position()), Some(Point::new(1.0, 2.0)));
        assert_eq!(source.get(b).and_then(|f| f.label()), Some("hello"));
    }

    #[test]
    fn distinct_sources_have_distinct_ids() {
        let a = PointSource::new();
        let b = PointSource::with_backend(FlatVec::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rect_queries_return_insertion_order() {
        let mut source = PointSource::with_cell_size(4.0);
        let ids: Vec<_> = (0..10)
            .map(|i| source.add_point(Point::new(f64::from(i) * 3.0, 0.0)))
            .collect();
        let hits: Vec<_> = source
            .features_in_rect(Rect::new(3.0, -1.0, 12.0, 1.0))
            .into_iter()
            .map(|f| f.id())
            .collect();
        assert_eq!(hits, ids[1..=4]);
    }
}
