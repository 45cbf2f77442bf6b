// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for screen-space points.
//!
//! This backend buckets points into fixed-size square cells and answers
//! queries by touching only the cells overlapping the query primitive. Each
//! point lives in exactly one cell. It is intended for workloads with:
//! - moderately uniform density on screen (tracked features over a plate),
//! - frequent single-point moves (dragging), and
//! - query rectangles and hit radii that are small compared to the viewport.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::backend::Backend;

type CellKey = (i32, i32);

/// Map a coordinate to a grid coordinate along one axis, rounding toward -∞.
///
/// Values outside the `i32` range saturate.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
pub(crate) fn cell_coord(value: f64, cell_size: f64) -> i32 {
    debug_assert!(cell_size > 0.0, "grid cell_size must be strictly positive");
    let t = value / cell_size;
    let coord = t as i32;

    // Round towards -∞ (the cast above has already truncated).
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

/// Uniform grid backend with a fixed cell size.
pub struct Grid {
    cell_size: f64,
    cells: HashMap<CellKey, Cell>,
    slots: Vec<Option<SlotEntry>>,
}

#[derive(Clone, Copy, Debug)]
struct SlotEntry {
    pos: Point,
    cell: CellKey,
}

#[derive(Default)]
struct Cell {
    slots: SmallVec<[usize; 8]>,
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total_slots = self.slots.len();
        let live_slots = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("total_slots", &total_slots)
            .field("live_slots", &live_slots)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl Grid {
    /// Create a new grid with the given cell size (in screen pixels).
    ///
    /// Non-positive or non-finite sizes fall back to one pixel.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            cells: HashMap::new(),
            slots: Vec::new(),
        }
    }

    /// Cell size in screen pixels.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn key_of(&self, pos: Point) -> CellKey {
        (
            cell_coord(pos.x, self.cell_size),
            cell_coord(pos.y, self.cell_size),
        )
    }

    fn detach(&mut self, slot: usize, key: CellKey) {
        if let Some(cell) = self.cells.get_mut(&key) {
            if let Some(i) = cell.slots.iter().position(|&s| s == slot) {
                cell.slots.swap_remove(i);
            }
            if cell.slots.is_empty() {
                // Dropping empty cells keeps the map compact for sparse grids.
                self.cells.remove(&key);
            }
        }
    }

    fn visit_cells<F: FnMut(usize, Point)>(&self, bounds: Rect, exact: Option<Rect>, mut f: F) {
        let (ix0, iy0) = self.key_of(Point::new(bounds.x0, bounds.y0));
        let (ix1, iy1) = self.key_of(Point::new(bounds.x1, bounds.y1));
        let span = (i64::from(ix1) - i64::from(ix0) + 1)
            .checked_mul(i64::from(iy1) - i64::from(iy0) + 1)
            .and_then(|s| usize::try_from(s).ok());
        let mut emit = |cell: &Cell| {
            for &slot in &cell.slots {
                if let Some(Some(entry)) = self.slots.get(slot)
                    && exact.is_none_or(|r| contains_inclusive(r, entry.pos))
                {
                    f(slot, entry.pos);
                }
            }
        };

        // Walking a huge range cell by cell costs more than scanning the
        // occupied cells once.
        let walk_all = span.is_none_or(|s| s > self.cells.len());
        if walk_all {
            for (&(ix, iy), cell) in &self.cells {
                if (ix0..=ix1).contains(&ix) && (iy0..=iy1).contains(&iy) {
                    emit(cell);
                }
            }
        } else {
            for ix in ix0..=ix1 {
                for iy in iy0..=iy1 {
                    if let Some(cell) = self.cells.get(&(ix, iy)) {
                        emit(cell);
                    }
                }
            }
        }
    }
}

fn contains_inclusive(rect: Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

impl Backend for Grid {
    fn insert(&mut self, slot: usize, pos: Point) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        // If this slot was previously used, clean up its old cell membership.
        if let Some(old) = self.slots[slot].take() {
            self.detach(slot, old.cell);
        }
        let cell = self.key_of(pos);
        self.cells.entry(cell).or_default().slots.push(slot);
        self.slots[slot] = Some(SlotEntry { pos, cell });
    }

    fn update(&mut self, slot: usize, pos: Point) {
        let Some(Some(entry)) = self.slots.get(slot).copied() else {
            // If the slot does not exist, treat this as an insert.
            self.insert(slot, pos);
            return;
        };
        let cell = self.key_of(pos);
        if cell != entry.cell {
            self.detach(slot, entry.cell);
            self.cells.entry(cell).or_default().slots.push(slot);
        }
        self.slots[slot] = Some(SlotEntry { pos, cell });
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.slots.clear();
    }

    fn position(&self, slot: usize) -> Option<Point> {
        self.slots.get(slot).copied().flatten().map(|e| e.pos)
    }

    fn visit_rect<F: FnMut(usize, Point)>(&self, rect: Rect, f: F) {
        let rect = rect.abs();
        self.visit_cells(rect, Some(rect), f);
    }

    fn visit_near<F: FnMut(usize, Point)>(&self, center: Point, radius: f64, f: F) {
        // With a radius no larger than the cell size this touches the cell
        // containing `center` and its immediate neighbors only.
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.visit_cells(bounds, None, f);
    }

    fn is_consistent(&self) -> bool {
        let mut seen = 0_usize;
        for (&key, cell) in &self.cells {
            if cell.slots.is_empty() {
                return false;
            }
            for &slot in &cell.slots {
                match self.slots.get(slot) {
                    Some(Some(entry)) if entry.cell == key && self.key_of(entry.pos) == key => {
                        seen += 1;
                    }
                    _ => return false,
                }
            }
        }
        // Every live slot is listed exactly once.
        seen == self.slots.iter().filter(|s| s.is_some()).count()
    }
}
