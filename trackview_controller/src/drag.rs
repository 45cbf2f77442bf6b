// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: turn a stream of pointer positions into per-event deltas.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use trackview_controller::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(Point::new(14.0, 25.0)), Some(Vec2::new(-1.0, 0.0)));
//! assert_eq!(drag.total_offset(Point::new(14.0, 25.0)), Some(Vec2::new(4.0, 5.0)));
//! drag.end();
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Start and last pointer positions of an active drag, in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    /// Where the drag began. `None` when no drag is active.
    pub start_pos: Option<Point>,
    /// Last position seen by [`DragState::update`].
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Begins a drag at `pos`, discarding any drag already in progress.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records a new pointer position and returns the delta since the last
    /// one, or `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Offset of `current_pos` from where the drag began.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_drag_reports_nothing() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(3.0, 4.0)), None);
        assert_eq!(drag.last_pos, None);
        assert_eq!(drag.total_offset(Point::new(3.0, 4.0)), None);
    }

    #[test]
    fn deltas_sum_to_total_offset() {
        let mut drag = DragState::default();
        drag.start(Point::new(100.0, 100.0));
        let path = [
            Point::new(101.5, 99.0),
            Point::new(110.0, 90.25),
            Point::new(80.0, 140.0),
        ];
        let mut sum = Vec2::ZERO;
        for p in path {
            sum += drag.update(p).unwrap();
        }
        assert_eq!(Some(sum), drag.total_offset(Point::new(80.0, 140.0)));
    }

    #[test]
    fn missing_last_position_is_recovered() {
        let mut drag = DragState {
            start_pos: Some(Point::new(1.0, 1.0)),
            last_pos: None,
        };
        assert_eq!(drag.update(Point::new(4.0, 5.0)), None);
        assert_eq!(drag.update(Point::new(5.0, 5.0)), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn restart_resets_origin() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(50.0, 50.0));
        drag.start(Point::new(10.0, 10.0));
        assert_eq!(drag.update(Point::new(12.0, 10.0)), Some(Vec2::new(2.0, 0.0)));
    }
}
