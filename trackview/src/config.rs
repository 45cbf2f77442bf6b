// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trackview_cache::CacheConfig;
use trackview_controller::ZoomConfig;
use trackview_coords::CoordinateConvention;
use trackview_index::IndexConfig;

/// How loaded data is presented.
///
/// Points are stored top-left Y-down after loading, matching image rows, so
/// the default display is the plain image orientation. Following the data
/// convention mirrors the plate and points together about the content frame,
/// which suits hosts whose axes are drawn Y-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Display data in the convention it was loaded with, so Y-up data is
    /// shown Y-up. When `false`, [`DisplayConfig::convention`] is used.
    pub follow_data_convention: bool,
    /// Display convention used when not following the data.
    pub convention: CoordinateConvention,
    /// Convention assumed when detection is ambiguous.
    pub fallback_convention: CoordinateConvention,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            follow_data_convention: false,
            convention: CoordinateConvention::CANONICAL,
            fallback_convention: CoordinateConvention::CANONICAL,
        }
    }
}

/// Aggregate configuration for an [`Engine`](crate::Engine).
///
/// With the `serde` feature every field is optional when deserializing, so a
/// host settings file only needs the values it overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Transform cache sizing and key tolerance.
    pub cache: CacheConfig,
    /// Hit radius and rebuild budget.
    pub index: IndexConfig,
    /// Zoom limits and wheel response.
    pub zoom: ZoomConfig,
    /// Display convention policy.
    pub display: DisplayConfig,
}

impl EngineConfig {
    /// Replaces the cache configuration.
    #[must_use]
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Replaces the index configuration.
    #[must_use]
    pub fn with_index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }

    /// Replaces the zoom configuration.
    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    /// Replaces the display configuration.
    #[must_use]
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }
}
