// Copyright 2025 the Pixmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend: points are bucketed into square cells keyed by integer coordinates.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::backend::{Backend, covers};

/// Default cell edge length in world units.
pub const DEFAULT_CELL_SIZE: f64 = 64.0;

type Cell = (i64, i64);

/// Uniform grid backend.
///
/// Rectangle queries visit only the cells the rectangle overlaps, falling back
/// to a linear scan when that would touch more cells than there are points.
pub struct Grid {
    cell_size: f64,
    positions: Vec<Option<Point>>,
    cells: HashMap<Cell, SmallVec<[usize; 4]>>,
    alive: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("cells", &self.cells.len())
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Creates an empty grid with the given cell edge length.
    ///
    /// Non-positive or non-finite sizes fall back to [`DEFAULT_CELL_SIZE`].
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            positions: Vec::new(),
            cells: HashMap::new(),
            alive: 0,
        }
    }

    /// Returns the cell edge length.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn cell_of(&self, p: Point) -> Cell {
        (floor_div(p.x, self.cell_size), floor_div(p.y, self.cell_size))
    }

    fn unlink(&mut self, slot: usize, point: Point) {
        let cell = self.cell_of(point);
        if let Some(bucket) = self.cells.get_mut(&cell) {
            bucket.retain(|s| *s != slot);
            if bucket.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    fn scan<F: FnMut(usize)>(&self, rect: &Rect, f: &mut F) {
        for (i, slot) in self.positions.iter().enumerate() {
            if let Some(p) = slot
                && covers(rect, *p)
            {
                f(i);
            }
        }
    }
}

impl Backend for Grid {
    fn insert(&mut self, slot: usize, point: Point) {
        if self.positions.len() <= slot {
            self.positions.resize_with(slot + 1, || None);
        }
        match self.positions[slot].replace(point) {
            Some(old) => self.unlink(slot, old),
            None => self.alive += 1,
        }
        let cell = self.cell_of(point);
        self.cells.entry(cell).or_default().push(slot);
    }

    fn remove(&mut self, slot: usize) {
        if let Some(old) = self.positions.get_mut(slot).and_then(Option::take) {
            self.unlink(slot, old);
            self.alive -= 1;
        }
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.cells.clear();
        self.alive = 0;
    }

    fn len(&self) -> usize {
        self.alive
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        if self.alive == 0 {
            return;
        }
        let (x0, y0) = self.cell_of(Point::new(rect.min_x(), rect.min_y()));
        let (x1, y1) = self.cell_of(Point::new(rect.max_x(), rect.max_y()));
        let span_x = x1.saturating_sub(x0).saturating_add(1);
        let span_y = y1.saturating_sub(y0).saturating_add(1);
        let cell_count = span_x.saturating_mul(span_y);
        if cell_count > i64::try_from(self.alive).unwrap_or(i64::MAX) {
            self.scan(&rect, &mut f);
            return;
        }
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                let Some(bucket) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &slot in bucket {
                    if let Some(p) = self.positions[slot]
                        && covers(&rect, p)
                    {
                        f(slot);
                    }
                }
            }
        }
    }
}

/// Floor of `v / size` as a cell coordinate, saturating for huge or non-finite values.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int `as` saturates, which is what far-away cells need"
)]
fn floor_div(v: f64, size: f64) -> i64 {
    let t = v / size;
    let i = t as i64;
    // `as` truncates toward zero; step down for negative non-integers.
    if (i as f64) > t { i - 1 } else { i }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use super::{Grid, floor_div};
    use crate::Backend;
    use crate::backends::FlatVec;

    #[test]
    fn floor_div_handles_negative_values() {
        assert_eq!(floor_div(0.0, 10.0), 0);
        assert_eq!(floor_div(9.9, 10.0), 0);
        assert_eq!(floor_div(10.0, 10.0), 1);
        assert_eq!(floor_div(-0.1, 10.0), -1);
        assert_eq!(floor_div(-10.0, 10.0), -1);
        assert_eq!(floor_div(-10.5, 10.0), -2);
    }

    #[test]
    fn moves_between_cells_on_reinsert() {
        let mut g = Grid::new(10.0);
        g.insert(0, Point::new(1.0, 1.0));
        g.insert(0, Point::new(55.0, 55.0));
        assert_eq!(g.len(), 1);
        assert_eq!(g.query_rect(Rect::new(0.0, 0.0, 5.0, 5.0)).count(), 0);
        assert_eq!(g.query_rect(Rect::new(50.0, 50.0, 60.0, 60.0)).count(), 1);
        g.remove(0);
        assert!(g.is_empty());
    }

    #[test]
    fn agrees_with_flat_vec() {
        let mut grid = Grid::new(7.0);
        let mut flat = FlatVec::default();
        let mut slot = 0;
        for i in -20..20_i32 {
            for j in -5..5_i32 {
                let p = Point::new(f64::from(i) * 3.3, f64::from(j * j) * 1.7 - 10.0);
                grid.insert(slot, p);
                flat.insert(slot, p);
                slot += 1;
            }
        }
        for slot in (0..slot).step_by(7) {
            grid.remove(slot);
            flat.remove(slot);
        }
        let queries = [
            Rect::new(-10.0, -10.0, 10.0, 10.0),
            Rect::new(-66.0, -20.0, -30.0, 0.0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(-1e9, -1e9, 1e9, 1e9),
        ];
        for q in queries {
            let mut a: Vec<usize> = grid.query_rect(q).collect();
            let b: Vec<usize> = flat.query_rect(q).collect();
            a.sort_unstable();
            assert_eq!(a, b, "grid and flat backends disagree for {q:?}");
        }
        assert_eq!(grid.len(), flat.len());
    }
}
