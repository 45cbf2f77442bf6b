// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Zoom limits and wheel response.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Zoom multiplier per wheel notch.
    pub step_factor: f64,
    /// Wheel delta units per notch. 120 matches common mouse wheels.
    pub notch: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.01,
            max_zoom: 100.0,
            step_factor: 1.25,
            notch: 120.0,
        }
    }
}

impl ZoomConfig {
    /// Sets the zoom limits.
    ///
    /// The pair is reordered so that `min <= max`, and both are kept strictly
    /// positive. Non-finite limits are ignored.
    #[must_use]
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        if !(min.is_finite() && max.is_finite()) {
            return self;
        }
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min_zoom = lo.max(f64::MIN_POSITIVE);
        self.max_zoom = hi.max(self.min_zoom);
        self
    }

    /// Sets the per-notch multiplier. Values not greater than one are ignored.
    #[must_use]
    pub fn with_step_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 1.0 {
            self.step_factor = factor;
        }
        self
    }

    /// Clamps `zoom` into `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Zoom multiplier for a wheel delta. Positive deltas zoom in.
    ///
    /// Partial notches from high-resolution wheels and touchpads scale
    /// smoothly: two half notches equal one full notch.
    #[must_use]
    pub fn wheel_factor(&self, delta: f64) -> f64 {
        if !delta.is_finite() || self.notch <= 0.0 {
            return 1.0;
        }
        self.step_factor.powf(delta / self.notch)
    }
}
