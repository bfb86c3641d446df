use convex2d::intersection::{contact_points, mtv, test_overlap};
use convex2d::math::vec2;
use convex2d::shape::polygon;
use convex2d::{collide, ContactStrategy, NarrowPhaseConfig, Shape, Transform};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::{Duration, Instant};

const PAIRS: usize = 10_000;
const SIZE: f32 = 4.0;

fn random_shape() -> Shape {
    let pos = vec2(fastrand::f32() * SIZE, fastrand::f32() * SIZE);
    let t = Transform::new(pos, fastrand::f32() * 6.28, vec2(1.0, 1.0));
    let r = 0.5 + fastrand::f32();
    if fastrand::u32(0..4) == 0 {
        Shape::circle(t, r)
    } else {
        Shape::polygon(t, &polygon::ngon(r, fastrand::u32(3..9)))
    }
}

fn pairs_setup() -> Vec<(Shape, Shape)> {
    fastrand::seed(1);
    (0..PAIRS).map(|_| (random_shape(), random_shape())).collect()
}

#[inline(never)]
fn run_gjk(pairs: &[(Shape, Shape)], config: &NarrowPhaseConfig, iter: u64) -> Duration {
    let start = Instant::now();
    for i in 0..iter as usize {
        let (a, b) = &pairs[i % pairs.len()];
        black_box(test_overlap(a, b, config));
    }
    start.elapsed()
}

#[inline(never)]
fn run_mtv(pairs: &[(Shape, Shape)], config: &NarrowPhaseConfig, iter: u64) -> Duration {
    let start = Instant::now();
    for i in 0..iter as usize {
        let (a, b) = &pairs[i % pairs.len()];
        black_box(mtv(a, b, config));
    }
    start.elapsed()
}

#[inline(never)]
fn run_collide(pairs: &[(Shape, Shape)], config: &NarrowPhaseConfig, iter: u64) -> Duration {
    let start = Instant::now();
    for i in 0..iter as usize {
        let (a, b) = &pairs[i % pairs.len()];
        black_box(collide(a, b, config));
    }
    start.elapsed()
}

fn narrow_phase(c: &mut Criterion) {
    let mut g = c.benchmark_group("Narrow phase");
    let pairs = pairs_setup();
    let config = NarrowPhaseConfig::default();

    g.bench_function("gjk", |b| {
        b.iter_custom(|iter| run_gjk(&pairs, &config, iter))
    });
    g.bench_function("gjk + epa", |b| {
        b.iter_custom(|iter| run_mtv(&pairs, &config, iter))
    });
    g.bench_function("collide clipping", |b| {
        b.iter_custom(|iter| run_collide(&pairs, &config, iter))
    });
    let support = NarrowPhaseConfig {
        contact_strategy: ContactStrategy::SupportPoint,
        ..config
    };
    g.bench_function("collide support point", |b| {
        b.iter_custom(|iter| run_collide(&pairs, &support, iter))
    });
    g.finish()
}

fn contacts(c: &mut Criterion) {
    let a = Shape::polygon(Transform::default(), &polygon::square(1.0));
    let b = Shape::polygon(Transform::at(vec2(0.5, 0.1)), &polygon::square(1.0));
    let config = NarrowPhaseConfig::default();
    let m = mtv(&a, &b, &config).expect("squares overlap");

    c.bench_function("clipping manifold", |bench| {
        bench.iter(|| contact_points(black_box(&a), black_box(&b), &m, &config))
    });
}

fn update(c: &mut Criterion) {
    let mut shape = Shape::polygon(Transform::default(), &polygon::ngon(1.0, 8));
    c.bench_function("update ngon8", |b| {
        b.iter(|| {
            shape
                .begin_update()
                .translate(black_box(vec2(0.01, 0.0)))
                .rotate(black_box(0.01));
        })
    });
}

criterion_group!(benches, narrow_phase, contacts, update);
criterion_main!(benches);
