// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `grid`: uniform grid with a cell size derived from the hit radius. The
//!   default backend of [`PointIndex`][crate::PointIndex].
//! - `flatvec`: flat vector with linear scans (small, simple).

pub(crate) mod flatvec;
pub(crate) mod grid;

pub use flatvec::FlatVec;
pub use grid::Grid;
