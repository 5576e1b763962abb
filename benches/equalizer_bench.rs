//! Criterion benchmarks for the weight equalizer.
//!
//! Uses synthetic weight sets to measure pipeline overhead: a mixed set
//! with outliers for the default single-key policy, and an all-equal set
//! with known rounding drift for the iterative redistribution policy.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weight_equalizer::{EqualizerConfig, EqualizerRunner, ReconcilePolicy, WeightSet};

/// Mixed weights in [-2.0, 7.9] with deterministic spread.
fn mixed_set(n: usize) -> WeightSet<usize> {
    WeightSet::from_entries(
        (0..n)
            .map(|i| (i, ((i * 37) % 100) as f64 / 10.0 - 2.0))
            .collect(),
    )
}

/// All-equal weights; rescaling `n` ones onto `n * 5 / 3` rounds every
/// value up to 1.7 and leaves `n / 30` of drift for redistribution.
fn equal_set(n: usize) -> WeightSet<usize> {
    WeightSet::from_entries((0..n).map(|i| (i, 1.0)).collect())
}

fn bench_single_key(c: &mut Criterion) {
    let config = EqualizerConfig::default();
    let mut group = c.benchmark_group("equalize_single_key");
    for &n in &[10usize, 100, 1000] {
        let set = mixed_set(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |b, set| {
            b.iter(|| EqualizerRunner::run(black_box(set), 100.0, &config));
        });
    }
    group.finish();
}

fn bench_redistribute(c: &mut Criterion) {
    let config = EqualizerConfig::default().with_policy(ReconcilePolicy::Redistribute);
    let mut group = c.benchmark_group("equalize_redistribute");
    for &n in &[6usize, 60, 600] {
        let set = equal_set(n);
        let target = n as f64 * 5.0 / 3.0;
        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |b, set| {
            b.iter(|| EqualizerRunner::run(black_box(set), black_box(target), &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_key, bench_redistribute);
criterion_main!(benches);
