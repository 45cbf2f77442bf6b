// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tuning for [`crate::PointIndex`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexConfig {
    /// Hit-test radius in screen pixels. Also sizes the grid cells.
    pub hit_radius: f64,
    /// Maximum number of points a single query may index while rebuilding.
    ///
    /// A rebuild that does not finish within the budget resumes on the next
    /// query; until then queries fall back to a linear scan.
    pub rebuild_budget: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            hit_radius: 8.0,
            rebuild_budget: 65_536,
        }
    }
}

impl IndexConfig {
    /// Sets the hit-test radius. Negative or non-finite values are ignored.
    #[must_use]
    pub fn with_hit_radius(mut self, radius: f64) -> Self {
        if radius.is_finite() && radius >= 0.0 {
            self.hit_radius = radius;
        }
        self
    }

    /// Sets the per-query rebuild budget. Zero is treated as one.
    #[must_use]
    pub fn with_rebuild_budget(mut self, budget: usize) -> Self {
        self.rebuild_budget = budget.max(1);
        self
    }

    /// Grid cell edge length: twice the hit radius, and at least one pixel.
    ///
    /// A hit-radius query then touches the containing cell and its immediate
    /// neighbors only, whatever the number of points.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        (self.hit_radius * 2.0).max(1.0)
    }
}
