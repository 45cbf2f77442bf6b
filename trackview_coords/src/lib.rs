// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackview Coords: coordinate conventions and point-set snapshots.
//!
//! Tracked points arrive from collaborators (file readers, trackers) in one of
//! several storage conventions: origin at the top-left, bottom-left or center
//! of the image frame, with Y growing down or up. This crate:
//! - Names those conventions ([`CoordinateConvention`]).
//! - Detects the convention of an ingested point set, using a declared hint
//!   when there is one and a best-effort frame comparison otherwise
//!   ([`CoordinateService::detect`]).
//! - Rewrites points into the canonical top-left, Y-down convention once at
//!   load time, and back again for export ([`CoordinateService::normalize`],
//!   [`CoordinateService::denormalize`]).
//! - Holds the point-set snapshot with its mutation revision ([`PointSet`]).
//!
//! Ambiguous input is never an error: detection falls back to a configured
//! convention and returns an [`AmbiguousConvention`] describing why.
//!
//! ```rust
//! use kurbo::Size;
//! use trackview_coords::{CoordinateConvention, CoordinateService, PointId, TrackedPoint};
//!
//! let raw = [TrackedPoint::new(PointId(1), -100.0, 40.0)];
//! let svc = CoordinateService::new();
//! let frame = Size::new(1920.0, 1080.0);
//!
//! let detection = svc.detect(&raw, None, Some(frame));
//! assert_eq!(detection.convention, CoordinateConvention::CenterYUp);
//!
//! let canonical = svc.normalize(&raw, detection.convention, frame);
//! assert_eq!(canonical[0].pos.x, 860.0);
//! assert_eq!(canonical[0].pos.y, 500.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod convention;
mod points;
mod service;

pub use convention::{CoordinateConvention, OriginCorner};
pub use points::{PointId, PointSet, TrackedPoint};
pub use service::{AmbiguityReason, AmbiguousConvention, CoordinateService, Detection};
