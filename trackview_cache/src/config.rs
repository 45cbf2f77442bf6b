// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Capacity and quantization settings for [`crate::TransformCache`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Maximum number of cached transforms. Values below one are treated as one.
    pub capacity: usize,
    /// Quantum for pan offsets (screen pixels) and data extents (data units).
    pub pan_quantum: f64,
    /// Quantum for the zoom factor.
    pub zoom_quantum: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            pan_quantum: 1e-3,
            zoom_quantum: 1e-6,
        }
    }
}

impl CacheConfig {
    /// Sets the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the pan/extent quantum. Non-positive values are ignored.
    #[must_use]
    pub fn with_pan_quantum(mut self, quantum: f64) -> Self {
        if quantum > 0.0 {
            self.pan_quantum = quantum;
        }
        self
    }

    /// Sets the zoom quantum. Non-positive values are ignored.
    #[must_use]
    pub fn with_zoom_quantum(mut self, quantum: f64) -> Self {
        if quantum > 0.0 {
            self.zoom_quantum = quantum;
        }
        self
    }
}
