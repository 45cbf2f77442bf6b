// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackview Controller: zoom and pan gestures as pure view-state updates.
//!
//! [`ZoomPanController`] turns input (wheel steps at a cursor, pan drags,
//! view commands) into the next [`ViewState`](trackview_view::ViewState).
//!
//! Zooming keeps the data point under the cursor in place:
//! 1. The cursor is mapped to data space with the *current* transform.
//! 2. The new zoom is clamped to [`ZoomConfig`] limits.
//! 3. A staged state with the new zoom and the old pan is built, and its own
//!    transform projects the data point back to screen.
//! 4. One pan correction moves that projection onto the cursor.
//!
//! Only the final state is returned, so a gesture causes at most one new
//! transform in the cache.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trackview_controller::{ZoomConfig, ZoomPanController};
//! use trackview_view::{PixelSize, Transform, ViewState};
//!
//! let controller = ZoomPanController::new(ZoomConfig::default());
//! let view = ViewState::new(PixelSize::new(800, 600))
//!     .with_content_extent(Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
//! let current = Transform::build(&view).unwrap();
//!
//! let cursor = Point::new(250.0, 120.0);
//! let under = current.screen_to_data(cursor);
//! let next = controller.zoom_at(&view, &current, cursor, 120.0).unwrap();
//!
//! let after = Transform::build(&next).unwrap().data_to_screen(under);
//! assert!((after - cursor).hypot() < 0.5);
//! ```

mod config;
mod controller;
mod drag;

pub use config::ZoomConfig;
pub use controller::{GestureState, ZoomPanController};
pub use drag::DragState;
