// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets
//! and as a reference when checking other backends.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::backend::Backend;

/// Flat vector backend with linear scans.
#[derive(Default)]
pub struct FlatVec {
    entries: Vec<Option<Point>>,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("FlatVec")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, pos: Point) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(pos);
    }

    fn update(&mut self, slot: usize, pos: Point) {
        self.insert(slot, pos);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, slot: usize) -> Option<Point> {
        self.entries.get(slot).copied().flatten()
    }

    fn visit_rect<F: FnMut(usize, Point)>(&self, rect: Rect, mut f: F) {
        let rect = rect.abs();
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(p) = *slot
                && rect.x0 <= p.x
                && p.x <= rect.x1
                && rect.y0 <= p.y
                && p.y <= rect.y1
            {
                f(i, p);
            }
        }
    }

    fn visit_near<F: FnMut(usize, Point)>(&self, _center: Point, _radius: f64, mut f: F) {
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(p) = *slot {
                f(i, p);
            }
        }
    }
}
