//! Criterion benchmarks for median-of-medians selection and the bridge search.
//! Focus sizes: n in {100, 1000, 10000}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use planar_hull::bridge::find_bridge;
use planar_hull::sample::{sample_points, ReplayToken, SampleCfg};
use planar_hull::select::{median_by_x, median_scalar};
use planar_hull::Chain;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_scalars(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0e3..1.0e3)).collect()
}

fn cloud(n: usize, seed: u64) -> Vec<nalgebra::Vector2<f64>> {
    let cfg = SampleCfg {
        count: n,
        width: 1.0e4,
        height: 1.0e4,
        min_separation: 0.0,
        integral: false,
    };
    sample_points(cfg, ReplayToken::new(seed)).expect("valid sample cfg")
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for &n in &[100usize, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("median_scalar", n), &n, |b, &n| {
            b.iter_batched(
                || random_scalars(n, 41),
                |v| median_scalar(&v),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("median_by_x", n), &n, |b, &n| {
            b.iter_batched(|| cloud(n, 42), |v| median_by_x(&v), BatchSize::SmallInput)
        });
        group.bench_with_input(BenchmarkId::new("sort_baseline", n), &n, |b, &n| {
            b.iter_batched(
                || random_scalars(n, 41),
                |mut v| {
                    v.sort_by(|a, b| a.total_cmp(b));
                    v[(v.len() - 1) / 2]
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_bridge(c: &mut Criterion) {
    let mut group = c.benchmark_group("bridge");
    for &n in &[100usize, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("upper_at_median", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let pts = cloud(n, 43);
                    let split = median_by_x(&pts).x;
                    (pts, split)
                },
                |(pts, split)| find_bridge(&pts, split, Chain::Upper),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_bridge);
criterion_main!(benches);
