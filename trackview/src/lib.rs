// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackview: coordinate transformation and spatial queries for a 2D
//! point-editing surface.
//!
//! [`Engine`] is the surface a host application talks to. It ties together
//! the workspace crates:
//! - `trackview_coords` detects the storage convention of loaded points and
//!   normalizes them once into the canonical top-left, Y-down convention.
//! - `trackview_view` describes the view as an immutable [`ViewState`] and
//!   derives the data ↔ screen [`Transform`].
//! - `trackview_cache` memoizes transforms by quantized view state.
//! - `trackview_index` answers hit tests and rubber-band selections.
//! - `trackview_controller` turns wheel and drag input into new view states
//!   that keep the point under the cursor in place.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trackview::{CoordinateConvention, Engine, EngineConfig, PixelSize, PointId, TrackedPoint};
//!
//! let mut engine = Engine::new(PixelSize::new(800, 600), EngineConfig::default()).unwrap();
//! engine.set_image_size(Some(PixelSize::new(1600, 1200))).unwrap();
//!
//! // Points authored with a bottom-left origin.
//! let raw = [
//!     TrackedPoint::new(PointId(1), 400.0, 300.0),
//!     TrackedPoint::new(PointId(2), 1200.0, 900.0),
//! ];
//! let report = engine
//!     .load_points(&raw, Some(CoordinateConvention::BottomLeftYUp))
//!     .unwrap();
//! assert!(report.warning.is_none());
//!
//! // Zoom in at the first point; it stays under the cursor and stays hittable.
//! let at = engine.to_screen(engine.points().position(PointId(1)).unwrap());
//! engine.wheel(at, 120.0).unwrap();
//! assert_eq!(engine.hit_test(at), Some(PointId(1)));
//!
//! let all = engine.range_query(Rect::new(-1e4, -1e4, 1e4, 1e4));
//! assert_eq!(all, vec![PointId(1), PointId(2)]);
//! ```
//!
//! Failures never corrupt state: a rejected view change (for example an empty
//! viewport during window layout) leaves the previous view and transform in
//! effect, and an ambiguous convention is reported in the [`LoadReport`]
//! rather than failing the load.

mod config;
mod engine;

pub use config::{DisplayConfig, EngineConfig};
pub use engine::{Engine, LoadReport};

pub use trackview_cache::{CacheConfig, CacheStats, TransformCache};
pub use trackview_controller::{GestureState, ZoomConfig};
pub use trackview_coords::{
    AmbiguityReason, AmbiguousConvention, CoordinateConvention, PointId, PointSet, TrackedPoint,
};
pub use trackview_index::IndexConfig;
pub use trackview_view::{PixelSize, Transform, ViewError, ViewState};
