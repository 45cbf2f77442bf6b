// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackview View: immutable view state and the data ↔ screen transform.
//!
//! This crate provides the pure geometric core of a pan/zoom point editor:
//! - [`ViewState`]: a value describing zoom, pan, viewport, optional
//!   background image, optional data extent and the display convention.
//! - [`Transform`]: the mapping derived from a state, with exact forward and
//!   inverse conversions between data space and screen pixels.
//!
//! Neither type holds interior state or performs I/O. Gestures produce new
//! `ViewState` values (see `trackview_controller`), and transforms are
//! memoized per state by `trackview_cache`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use trackview_view::{PixelSize, Transform, ViewState};
//!
//! // 800x600 viewport showing a 1920x1080 plate, zoomed in 2x.
//! let view = ViewState::new(PixelSize::new(800, 600))
//!     .with_image_size(Some(PixelSize::new(1920, 1080)))
//!     .with_zoom(2.0)
//!     .with_pan(Vec2::new(-40.0, 10.0));
//! let transform = Transform::build(&view).unwrap();
//!
//! let data = Point::new(960.0, 540.0);
//! let screen = transform.data_to_screen(data);
//! let back = transform.screen_to_data(screen);
//! assert!((back - data).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and multiplies the fit-to-viewport scale; zoom `1.0`
//!   with zero pan always shows the whole content frame centered.
//! - Pan is expressed in screen pixels and applied last, so it never
//!   interacts with zoom.
//! - The optional vertical flip mirrors about the content frame, so a Y-up
//!   display of the same frame lines up with its Y-down image.
//!
//! This crate is `no_std`.

#![no_std]

mod error;
mod transform;
mod view_state;

pub use error::ViewError;
pub use transform::Transform;
pub use view_state::{PixelSize, ViewState};
