// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackview Index: screen-space point index for hit testing and selection.
//!
//! [`PointIndex`] answers two questions about a [`PointSet`] as it appears on
//! screen under a [`Transform`]:
//! - Which point is closest to the cursor, within a radius? Ties go to the
//!   lowest [`PointId`].
//! - Which points lie inside a rubber-band rectangle? Edges are inclusive and
//!   results are sorted by id.
//!
//! The index is versioned by the point-set revision and the transform it was
//! built against. Queries pass both in; a mismatch triggers a rebuild, so a
//! stale index never answers. Rebuilding is budgeted per query and falls
//! back to a linear scan while in progress, which keeps single queries on
//! very large sets bounded.
//!
//! Backends are pluggable via [`Backend`]:
//! - [`Grid`](backends::Grid) *(default)*: uniform grid with cells twice the
//!   hit radius. Hit tests touch a constant number of cells.
//! - [`FlatVec`](backends::FlatVec): linear scan. Useful as a reference and
//!   for tiny sets.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trackview_coords::{PointId, PointSet, TrackedPoint};
//! use trackview_index::{IndexConfig, PointIndex};
//! use trackview_view::{PixelSize, Transform, ViewState};
//!
//! let mut points = PointSet::from_points([
//!     TrackedPoint::new(PointId(1), 100.0, 100.0),
//!     TrackedPoint::new(PointId(2), 300.0, 120.0),
//! ]);
//! let transform = Transform::build(&ViewState::new(PixelSize::new(800, 600))).unwrap();
//! let mut index = PointIndex::new(IndexConfig::default());
//!
//! assert_eq!(index.hit_test(&points, &transform, Point::new(103.0, 98.0)), Some(PointId(1)));
//! let band = index.query_range(&points, &transform, Rect::new(0.0, 0.0, 400.0, 200.0));
//! assert_eq!(band, vec![PointId(1), PointId(2)]);
//!
//! // Moving a point bumps the revision; the next query sees the new position.
//! points.set_position(PointId(2), Point::new(700.0, 500.0));
//! assert_eq!(index.hit_test(&points, &transform, Point::new(700.0, 500.0)), Some(PointId(2)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod config;
mod index;

pub use backend::Backend;
pub use config::IndexConfig;
pub use index::{IndexStatus, IndexTag, PointIndex};
