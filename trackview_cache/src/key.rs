// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trackview_coords::CoordinateConvention;
use trackview_view::{PixelSize, ViewState};

use crate::config::CacheConfig;

/// Quantized [`ViewState`] used as a cache key.
///
/// Continuous fields are snapped to a grid fine enough that two states with
/// the same key produce screen positions well under a pixel apart, while any
/// visible change lands on a different key. Discrete fields are compared
/// exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewKey {
    zoom: i64,
    pan: (i64, i64),
    viewport: PixelSize,
    image_size: Option<PixelSize>,
    source_size: Option<(i64, i64)>,
    content_extent: Option<[i64; 4]>,
    flip_y: bool,
    convention: CoordinateConvention,
}

impl ViewKey {
    /// Quantizes `view` with the tolerances in `config`.
    ///
    /// Pan, source size and data extent share the pan quantum; zoom uses its
    /// own.
    #[must_use]
    pub fn quantize(view: &ViewState, config: &CacheConfig) -> Self {
        let pq = config.pan_quantum;
        let pan = view.pan();
        Self {
            zoom: snap(view.zoom(), config.zoom_quantum),
            pan: (snap(pan.x, pq), snap(pan.y, pq)),
            viewport: view.viewport(),
            image_size: view.image_size(),
            source_size: view
                .source_size()
                .map(|s| (snap(s.width, pq), snap(s.height, pq))),
            content_extent: view
                .content_extent()
                .map(|r| [snap(r.x0, pq), snap(r.y0, pq), snap(r.x1, pq), snap(r.y1, pq)]),
            flip_y: view.flip_y(),
            convention: view.convention(),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Float to int casts saturate; out-of-range values share the extreme bucket."
)]
fn snap(value: f64, quantum: f64) -> i64 {
    (value / quantum).round() as i64
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;
    use trackview_view::{PixelSize, ViewState};

    use super::ViewKey;
    use crate::config::CacheConfig;

    #[test]
    fn jitter_below_quantum_shares_a_key() {
        let cfg = CacheConfig::default();
        let a = ViewState::new(PixelSize::new(800, 600))
            .with_zoom(1.5)
            .with_pan(Vec2::new(10.0, 20.0));
        let b = a.with_zoom(1.5 + 1e-9).with_pan(Vec2::new(10.0 + 1e-6, 20.0 - 1e-6));
        assert_eq!(ViewKey::quantize(&a, &cfg), ViewKey::quantize(&b, &cfg));
    }

    #[test]
    fn visible_changes_change_the_key() {
        let cfg = CacheConfig::default();
        let a = ViewState::new(PixelSize::new(800, 600));
        let k = ViewKey::quantize(&a, &cfg);
        assert_ne!(k, ViewKey::quantize(&a.with_pan(Vec2::new(0.5, 0.0)), &cfg));
        assert_ne!(k, ViewKey::quantize(&a.with_zoom(1.001), &cfg));
        assert_ne!(k, ViewKey::quantize(&a.with_flip_y(true), &cfg));
        assert_ne!(
            k,
            ViewKey::quantize(&a.with_viewport(PixelSize::new(801, 600)), &cfg)
        );
    }
}
