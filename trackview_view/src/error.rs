// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors raised while deriving a [`crate::Transform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The viewport has a zero dimension, so no content can be fitted into it.
    #[error("invalid viewport {width}x{height}: both dimensions must be positive")]
    InvalidViewport {
        /// Requested viewport width in pixels.
        width: u32,
        /// Requested viewport height in pixels.
        height: u32,
    },
}
