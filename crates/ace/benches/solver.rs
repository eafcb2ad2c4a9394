//! ACE benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Smoothers on their own (fixed span, supersmoother)
//! - Full solves as the sample grows
//! - Full solves as predictors are added
//! - Sequential against Jacobi sweeps
//!
//! Run with: `cargo bench`

use ace::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::prelude::*;
use rand_distr::Normal;
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Noisy sine wave sampled at sorted uniform points.
fn generate_sine_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.2).unwrap();

    let mut x: Vec<f64> = (0..size).map(|_| rng.random_range(0.0..10.0)).collect();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let y = x
        .iter()
        .map(|&xi| xi.sin() + noise_dist.sample(&mut rng))
        .collect();
    (x, y)
}

/// Additive problem with `p` uniform predictors on [−1, 1].
fn generate_additive_data(size: usize, p: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.1).unwrap();

    let x: Vec<Vec<f64>> = (0..p)
        .map(|_| (0..size).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect();
    let y = (0..size)
        .map(|k| {
            let signal: f64 = x
                .iter()
                .enumerate()
                .map(|(i, col)| match i % 3 {
                    0 => (4.0 * col[k]).sin(),
                    1 => col[k] * col[k],
                    _ => col[k],
                })
                .sum();
            (4.0 + signal + noise_dist.sample(&mut rng)).abs().ln()
        })
        .collect();
    (x, y)
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_smoothers(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothers");
    group.sample_size(50);

    for size in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        let (x, y) = generate_sine_data(size, 42);

        group.bench_with_input(BenchmarkId::new("fixed_span", size), &size, |b, _| {
            let smoother = FixedSpanSmoother::<f64>::new(0.2).cross_validate(true);
            b.iter(|| smoother.smooth_sorted(black_box(&x), black_box(&y)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("tricube", size), &size, |b, _| {
            let smoother = FixedSpanSmoother::<f64>::new(0.05).weight_function(Tricube);
            b.iter(|| smoother.smooth_sorted(black_box(&x), black_box(&y)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("supersmoother", size), &size, |b, _| {
            let smoother = SuperSmoother::<f64>::default();
            b.iter(|| smoother.smooth_sorted(black_box(&x), black_box(&y)).unwrap())
        });
    }
    group.finish();
}

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(20);

    for size in [200, 1_000, 5_000] {
        group.throughput(Throughput::Elements(size as u64));
        let (x, y) = generate_additive_data(size, 5, 42);

        group.bench_with_input(BenchmarkId::new("fit", size), &size, |b, _| {
            b.iter(|| {
                let mut model = Ace::new().build().unwrap();
                model.fit(black_box(&x), black_box(&y)).unwrap().correlation
            })
        });
    }
    group.finish();
}

fn bench_predictors(c: &mut Criterion) {
    let mut group = c.benchmark_group("predictors");
    group.sample_size(20);

    for p in [1, 4, 16] {
        let (x, y) = generate_additive_data(1_000, p, 7);

        group.bench_with_input(BenchmarkId::new("fit", p), &p, |b, _| {
            b.iter(|| {
                let mut model = Ace::new().build().unwrap();
                model.fit(black_box(&x), black_box(&y)).unwrap().correlation
            })
        });
    }
    group.finish();
}

fn bench_sweep_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_order");
    group.sample_size(20);

    let (x, y) = generate_additive_data(2_000, 8, 11);

    for (name, order) in [("sequential", Sequential), ("jacobi", Jacobi)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut model = Ace::new().sweep(order).build().unwrap();
                model.fit(black_box(&x), black_box(&y)).unwrap().correlation
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_smoothers,
    bench_scalability,
    bench_predictors,
    bench_sweep_order,
);

criterion_main!(benches);
