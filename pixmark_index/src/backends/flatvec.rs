// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point storage in a plain vector, queried by scanning every slot.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::backend::{Backend, covers};

/// Linear-scan point backend; the reference the grid is tested against.
#[derive(Default)]
pub struct FlatVec {
    entries: Vec<Option<Point>>,
    alive: usize,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("total_slots", &self.entries.len())
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, point: Point) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        if self.entries[slot].replace(point).is_none() {
            self.alive += 1;
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some(e) = self.entries.get_mut(slot)
            && e.take().is_some()
        {
            self.alive -= 1;
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.alive = 0;
    }

    fn len(&self) -> usize {
        self.alive
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(p) = slot
                && covers(&rect, *p)
            {
                f(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use super::FlatVec;
    use crate::Backend;

    #[test]
    fn insert_query_remove() {
        let mut b = FlatVec::default();
        b.insert(0, Point::new(1.0, 1.0));
        b.insert(3, Point::new(5.0, 5.0));
        assert_eq!(b.len(), 2);

        let hits: Vec<usize> = b.query_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).collect();
        assert_eq!(hits, [0, 3], "edges are inclusive");

        b.remove(0);
        b.remove(0);
        assert_eq!(b.len(), 1);
        let hits: Vec<usize> = b.query_rect(Rect::new(0.0, 0.0, 2.0, 2.0)).collect();
        assert!(hits.is_empty());

        b.clear();
        assert!(b.is_empty());
    }

    #[test]
    fn reinsert_replaces_point() {
        let mut b = FlatVec::default();
        b.insert(1, Point::new(0.0, 0.0));
        b.insert(1, Point::new(10.0, 10.0));
        assert_eq!(b.len(), 1);
        assert_eq!(b.query_rect(Rect::new(-1.0, -1.0, 1.0, 1.0)).count(), 0);
        assert_eq!(b.query_rect(Rect::new(9.0, 9.0, 11.0, 11.0)).count(), 1);
    }
}
