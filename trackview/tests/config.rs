// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading `EngineConfig` from a host settings file.

use trackview::{CoordinateConvention, EngineConfig};

#[test]
fn partial_settings_keep_defaults() {
    let json = r#"{
        "zoom": { "max_zoom": 20.0 },
        "index": { "hit_radius": 4.0 },
        "display": { "follow_data_convention": true, "convention": "BottomLeftYUp" }
    }"#;
    let config: EngineConfig = serde_json::from_str(json).unwrap();
    let defaults = EngineConfig::default();
    assert_eq!(config.zoom.max_zoom, 20.0);
    assert_eq!(config.zoom.min_zoom, defaults.zoom.min_zoom);
    assert_eq!(config.index.hit_radius, 4.0);
    assert_eq!(config.index.rebuild_budget, defaults.index.rebuild_budget);
    assert_eq!(config.cache, defaults.cache);
    assert!(config.display.follow_data_convention);
    assert_eq!(config.display.convention, CoordinateConvention::BottomLeftYUp);
}

#[test]
fn settings_round_trip() {
    let config = EngineConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
    assert_eq!(serde_json::from_str::<EngineConfig>("{}").unwrap(), config);
}
