// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Round-trip properties of `Transform` over randomized view states.

use kurbo::{Point, Rect, Size, Vec2};
use trackview_coords::CoordinateConvention;
use trackview_view::{PixelSize, Transform, ViewState};

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    fn dim(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % u64::from(hi - lo)) as u32
    }
}

fn random_view(rng: &mut Rng) -> ViewState {
    let viewport = PixelSize::new(rng.dim(1, 4000), rng.dim(1, 3000));
    let mut view = ViewState::new(viewport)
        .with_zoom(rng.range(0.01, 100.0))
        .with_pan(Vec2::new(rng.range(-5000.0, 5000.0), rng.range(-5000.0, 5000.0)));
    match rng.next_u64() % 3 {
        0 => {
            view = view.with_image_size(Some(PixelSize::new(rng.dim(16, 8192), rng.dim(16, 8192))));
            if rng.next_u64() % 2 == 0 {
                view = view.with_source_size(Some(Size::new(
                    rng.range(100.0, 8000.0),
                    rng.range(100.0, 8000.0),
                )));
            }
        }
        1 => {
            let x0 = rng.range(-1000.0, 1000.0);
            let y0 = rng.range(-1000.0, 1000.0);
            view = view.with_content_extent(Some(Rect::new(
                x0,
                y0,
                x0 + rng.range(1.0, 5000.0),
                y0 + rng.range(1.0, 5000.0),
            )));
        }
        _ => {}
    }
    let convention = CoordinateConvention::ALL[(rng.next_u64() % 3) as usize];
    view.with_convention(convention)
}

fn assert_relative(back: Point, orig: Point, what: &str) {
    let scale = orig.x.abs().max(orig.y.abs()).max(1.0);
    let err = (back.x - orig.x).abs().max((back.y - orig.y).abs());
    assert!(
        err <= 1e-6 * scale,
        "{what}: {orig:?} came back as {back:?} (err {err:e})"
    );
}

#[test]
fn data_screen_data_round_trip() {
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    for _ in 0..500 {
        let view = random_view(&mut rng);
        let t = Transform::build(&view).expect("random views have non-empty viewports");
        let vp = view.viewport().to_size();
        for _ in 0..20 {
            // Sample data points that land inside the viewport.
            let screen = Point::new(rng.range(0.0, vp.width), rng.range(0.0, vp.height));
            let data = t.screen_to_data(screen);
            let back = t.screen_to_data(t.data_to_screen(data));
            assert_relative(back, data, "data round trip");
            let screen_back = t.data_to_screen(data);
            assert_relative(screen_back, screen, "screen round trip");
        }
    }
}

#[test]
fn repeated_round_trips_do_not_accumulate() {
    let mut rng = Rng(0xDEAD_BEEF_1234_5678);
    let view = random_view(&mut rng);
    let t = Transform::build(&view).unwrap();
    let orig = t.screen_to_data(Point::new(17.25, 3.5));
    let mut p = orig;
    for _ in 0..1000 {
        p = t.screen_to_data(t.data_to_screen(p));
    }
    assert_relative(p, orig, "iterated round trip");
}

#[test]
fn rebuilding_from_the_same_state_is_deterministic() {
    let mut rng = Rng(42);
    for _ in 0..50 {
        let view = random_view(&mut rng);
        let a = Transform::build(&view).unwrap();
        let b = Transform::build(&view).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.view_state(), &view);
    }
}
