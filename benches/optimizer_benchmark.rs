#[macro_use]
extern crate criterion;

use criterion::{black_box, BatchSize, BenchmarkId, Criterion};
use interval_uct::{
    FnEvaluator, Interval, IntervalTree, OptimizerConfig, Outcome, ParameterRange, SampleRecord,
    UctOptimizer,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

// Noisy objective peaking at 250, the same shape as a typical tuning target
fn noisy_peak(rng: &mut StdRng, value: f64) -> Outcome {
    let probability = if value <= 500.0 {
        -value * (value - 500.0) / 62_500.0
    } else {
        -(value - 500.0) * (value - 1000.0) / 125_000.0
    };

    if rng.gen::<f64>() < probability {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

fn bench_tune_params(c: &mut Criterion) {
    let mut group = c.benchmark_group("tune_params");
    group.measurement_time(Duration::from_secs(10));

    let params = [ParameterRange::new("k", 0.0, 1000.0)];

    // Test different branching factors
    for bf in [2, 5, 10].iter() {
        let config = OptimizerConfig::default()
            .with_iterations(1000)
            .with_branching_factor(*bf)
            .with_seed(1);

        group.bench_with_input(BenchmarkId::new("branching_factor", bf), bf, |b, &_| {
            b.iter(|| {
                let mut outcomes = StdRng::seed_from_u64(2);
                let evaluator =
                    FnEvaluator::new(|_: &str, value: f64| noisy_peak(&mut outcomes, value));
                let mut optimizer = UctOptimizer::new(config.clone(), evaluator);
                black_box(optimizer.tune_params(&params))
            })
        });
    }

    // Test different iteration counts
    for &iter_count in &[100, 1000, 5000] {
        let config = OptimizerConfig::default()
            .with_iterations(iter_count)
            .with_seed(1);

        group.bench_with_input(
            BenchmarkId::new("iterations", iter_count),
            &iter_count,
            |b, &_| {
                b.iter(|| {
                    let mut outcomes = StdRng::seed_from_u64(2);
                    let evaluator =
                        FnEvaluator::new(|_: &str, value: f64| noisy_peak(&mut outcomes, value));
                    let mut optimizer = UctOptimizer::new(config.clone(), evaluator);
                    black_box(optimizer.tune_params(&params))
                })
            },
        );
    }

    group.finish();
}

fn bench_backpropagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate_result");

    // Chains of increasing depth, propagated from the deepest node
    for &depth in &[10usize, 100, 1000] {
        let mut tree = IntervalTree::new(Interval::new(0.0, 1.0), 0.3, 2).unwrap();
        let mut leaf = tree.root();
        for _ in 0..depth {
            leaf = tree.expand_child(leaf, 0).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &_| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    let record = SampleRecord::new("k", 0.0, Outcome::Win);
                    tree.propagate_result(black_box(leaf), record);
                    tree
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tune_params, bench_backpropagation);
criterion_main!(benches);
