// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use trackview_cache::{CacheConfig, TransformCache};
use trackview_view::{PixelSize, Transform, ViewState};

fn base_view() -> ViewState {
    ViewState::new(PixelSize::new(1920, 1080))
        .with_image_size(Some(PixelSize::new(4096, 2160)))
        .with_zoom(2.5)
        .with_pan(Vec2::new(-130.0, 42.0))
}

fn bench_lookup(c: &mut Criterion) {
    let view = base_view();
    let mut group = c.benchmark_group("transform_lookup");
    group.bench_function("direct_build", |b| {
        b.iter(|| Transform::build(black_box(&view)).unwrap())
    });
    let cache = TransformCache::new(CacheConfig::default());
    cache.get_or_build(&view).unwrap();
    group.bench_function("cache_hit", |b| {
        b.iter(|| cache.get_or_build(black_box(&view)).unwrap())
    });
    group.bench_function("cache_churn", |b| {
        let churn = TransformCache::new(CacheConfig::default().with_capacity(8));
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let v = view.with_pan(Vec2::new(f64::from(i % 64), 0.0));
            churn.get_or_build(&v).unwrap()
        })
    });
    group.finish();
}

fn bench_mapping(c: &mut Criterion) {
    let transform = Transform::build(&base_view()).unwrap();
    let probes: Vec<Point> = (0..1024)
        .map(|i| Point::new(f64::from(i) * 3.7, f64::from(i % 97) * 21.0))
        .collect();
    c.bench_function("data_to_screen_1024", |b| {
        b.iter(|| {
            probes
                .iter()
                .map(|&p| transform.data_to_screen(p).x)
                .sum::<f64>()
        })
    });
    c.bench_function("round_trip_1024", |b| {
        b.iter(|| {
            probes
                .iter()
                .map(|&p| transform.screen_to_data(transform.data_to_screen(p)).y)
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_lookup, bench_mapping);
criterion_main!(benches);
