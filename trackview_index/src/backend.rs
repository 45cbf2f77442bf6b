// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for point indexing strategies.

use kurbo::{Point, Rect};

/// Spatial backend abstraction used by [`PointIndex`][crate::PointIndex].
///
/// Backends store screen-space positions under dense slot numbers assigned by
/// the index. They answer candidate queries; exact distance and tie-breaking
/// are the index's job.
pub trait Backend {
    /// Insert a slot at `pos`, replacing any previous position of that slot.
    fn insert(&mut self, slot: usize, pos: Point);

    /// Move an existing slot. Unknown slots are inserted.
    fn update(&mut self, slot: usize, pos: Point);

    /// Clear all slots.
    fn clear(&mut self);

    /// Current position of a slot.
    fn position(&self, slot: usize) -> Option<Point>;

    /// Visit slots whose position lies inside `rect` (edges included).
    fn visit_rect<F: FnMut(usize, Point)>(&self, rect: Rect, f: F);

    /// Visit candidate slots that may lie within `radius` of `center`.
    ///
    /// Implementations may report slots farther away than `radius`, but must
    /// not omit any slot within it.
    fn visit_near<F: FnMut(usize, Point)>(&self, center: Point, radius: f64, f: F);

    /// Check internal bookkeeping. Used by tests and debug assertions.
    ///
    /// The default implementation reports success.
    fn is_consistent(&self) -> bool {
        true
    }
}
