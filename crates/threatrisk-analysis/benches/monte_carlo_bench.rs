use criterion::{criterion_group, criterion_main, Criterion};

use threatrisk_analysis::aggregate::MonteCarloSimulator;
use threatrisk_analysis::bayesian::{monte_carlo_dynamic, BayesianThreatState};
use threatrisk_analysis::rng::rng_from_seed;

/// 50 threats with probabilities spread over [0, 0.5).
fn probabilities() -> Vec<f64> {
    (0..50).map(|i| 0.01 * i as f64).collect()
}

fn bench_static_sequential(c: &mut Criterion) {
    let probs = probabilities();
    let sim = MonteCarloSimulator::new(10_000).with_seed(42);
    c.bench_function("monte_carlo_static_10k", |b| {
        b.iter(|| sim.estimate(std::hint::black_box(&probs)))
    });
}

fn bench_static_parallel(c: &mut Criterion) {
    let probs = probabilities();
    let sim = MonteCarloSimulator::new(100_000).with_seed(42).with_parallel(true);
    c.bench_function("monte_carlo_static_parallel_100k", |b| {
        b.iter(|| sim.estimate(std::hint::black_box(&probs)))
    });
}

fn bench_dynamic(c: &mut Criterion) {
    let states: Vec<BayesianThreatState> = (0..50)
        .map(|i| {
            BayesianThreatState::with_prior(format!("T{i}"), 1.0 + i as f64, 50.0).unwrap()
        })
        .collect();
    c.bench_function("monte_carlo_dynamic_10k", |b| {
        b.iter(|| {
            let mut rng = rng_from_seed(Some(42));
            monte_carlo_dynamic(std::hint::black_box(&states), 10_000, &mut rng)
        })
    });
}

criterion_group!(benches, bench_static_sequential, bench_static_parallel, bench_dynamic);
criterion_main!(benches);
