// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use trackview_coords::{PointId, PointSet, TrackedPoint};
use trackview_index::backends::{FlatVec, Grid};
use trackview_index::{Backend, IndexConfig, PointIndex};
use trackview_view::{PixelSize, Transform, ViewState};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
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
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `n` points spread uniformly over a 4K plate.
fn gen_uniform_points(n: u32) -> PointSet {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    PointSet::from_points((0..n).map(|i| {
        TrackedPoint::new(PointId(i), rng.next_f64() * 3840.0, rng.next_f64() * 2160.0)
    }))
}

/// `n` points in tight clusters, as feature trackers tend to produce.
fn gen_clustered_points(n: u32) -> PointSet {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<(f64, f64)> = (0..16)
        .map(|_| (rng.next_f64() * 3840.0, rng.next_f64() * 2160.0))
        .collect();
    PointSet::from_points((0..n).map(|i| {
        let (cx, cy) = centers[i as usize % centers.len()];
        let dx = (rng.next_f64() - 0.5) * 120.0;
        let dy = (rng.next_f64() - 0.5) * 120.0;
        TrackedPoint::new(PointId(i), cx + dx, cy + dy)
    }))
}

fn plate_transform() -> Transform {
    let view = ViewState::new(PixelSize::new(1920, 1080))
        .with_image_size(Some(PixelSize::new(3840, 2160)))
        .with_zoom(1.5);
    Transform::build(&view).unwrap()
}

fn gen_cursors(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * 1920.0, rng.next_f64() * 1080.0))
        .collect()
}

fn bench_rebuild(c: &mut Criterion) {
    let transform = plate_transform();
    let mut group = c.benchmark_group("rebuild");
    for &n in &[1_000u32, 10_000, 100_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(BenchmarkId::new("Grid", n), |b| {
            b.iter_batched(
                || PointIndex::new(IndexConfig::default()),
                |mut idx| {
                    idx.rebuild(&points, &transform);
                    idx
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            b.iter_batched(
                || PointIndex::with_backend(IndexConfig::default(), FlatVec::default()),
                |mut idx| {
                    idx.rebuild(&points, &transform);
                    idx
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion, name: &str, make_points: impl Fn(u32) -> PointSet) {
    fn bench<B: Backend>(
        b: &mut criterion::Bencher,
        points: &PointSet,
        transform: &Transform,
        cursors: &[Point],
        mut idx: PointIndex<B>,
    ) {
        idx.rebuild(points, transform);
        b.iter(|| {
            let mut hits = 0usize;
            for &at in cursors {
                if idx.hit_test(points, transform, at).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    }

    let transform = plate_transform();
    let cursors = gen_cursors(256);
    let mut group = c.benchmark_group(name);
    for &n in &[1_000u32, 10_000, 100_000] {
        let points = make_points(n);
        group.throughput(Throughput::Elements(cursors.len() as u64));
        group.bench_function(BenchmarkId::new("Grid", n), |b| {
            bench(b, &points, &transform, &cursors, PointIndex::new(IndexConfig::default()))
        });
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            let idx = PointIndex::with_backend(IndexConfig::default(), FlatVec::default());
            bench(b, &points, &transform, &cursors, idx)
        });
    }
    group.finish();
}

fn bench_hit_test_uniform(c: &mut Criterion) {
    bench_hit_test(c, "hit_test_uniform", gen_uniform_points);
}

fn bench_hit_test_clustered(c: &mut Criterion) {
    bench_hit_test(c, "hit_test_clustered", gen_clustered_points);
}

fn bench_range(c: &mut Criterion) {
    let transform = plate_transform();
    let band = Rect::new(600.0, 300.0, 1000.0, 600.0);
    let mut group = c.benchmark_group("range_query");
    for &n in &[1_000u32, 10_000, 100_000] {
        let points = gen_uniform_points(n);
        let mut grid = PointIndex::new(IndexConfig::default());
        grid.rebuild(&points, &transform);
        group.bench_function(BenchmarkId::new("Grid", n), |b| {
            b.iter(|| black_box(grid.query_range(&points, &transform, band)).len())
        });
        let mut flat = PointIndex::with_backend(IndexConfig::default(), FlatVec::default());
        flat.rebuild(&points, &transform);
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            b.iter(|| black_box(flat.query_range(&points, &transform, band)).len())
        });
    }
    group.finish();
}

fn bench_drag_move(c: &mut Criterion) {
    let transform = plate_transform();
    let mut group = c.benchmark_group("drag_move");
    let n = 10_000u32;
    group.bench_function(BenchmarkId::new("apply_move", n), |b| {
        b.iter_batched(
            || {
                let points = gen_uniform_points(n);
                let mut idx = PointIndex::<Grid>::new(IndexConfig::default());
                idx.rebuild(&points, &transform);
                (points, idx)
            },
            |(mut points, mut idx)| {
                for step in 0..64 {
                    let before = points.revision();
                    let to = Point::new(100.0 + f64::from(step) * 30.0, 900.0);
                    points.set_position(PointId(42), to);
                    idx.apply_move(PointId(42), &points, &transform, before);
                }
                idx.hit_test(&points, &transform, Point::new(500.0, 500.0))
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_hit_test_uniform,
    bench_hit_test_clustered,
    bench_range,
    bench_drag_move,
);
criterion_main!(benches);
