//! Monte Carlo compromise estimation.
//!
//! Each trial draws one uniform value per threat and activates the threat
//! when the draw is below its probability. A trial is a compromise when any
//! threat activates. Trials are independent and never touch catalog state.

use rand::Rng;
use rayon::prelude::*;
use threatrisk_core::constants::PARALLEL_CHUNKS;
use threatrisk_core::types::Threat;

use super::analytic::{analytic_compromise_probability, included_probabilities};
use super::types::AggregateResult;
use crate::rng::{rng_from_seed, stream_rng};

/// Number of compromised trials out of `iterations`.
pub fn count_compromises<R: Rng + ?Sized>(
    probabilities: &[f64],
    iterations: u64,
    rng: &mut R,
) -> u64 {
    let mut successes = 0;
    for _ in 0..iterations {
        if probabilities.iter().any(|&p| rng.gen::<f64>() < p) {
            successes += 1;
        }
    }
    successes
}

/// Fraction of compromised trials.
///
/// Returns `None` when `iterations` is zero: no trials means no estimate,
/// and the closed form is not substituted.
pub fn monte_carlo_compromise_probability<R: Rng + ?Sized>(
    probabilities: &[f64],
    iterations: u64,
    rng: &mut R,
) -> Option<f64> {
    if iterations == 0 {
        return None;
    }
    let successes = count_compromises(probabilities, iterations, rng);
    tracing::debug!(iterations, successes, "monte carlo pass complete");
    Some(successes as f64 / iterations as f64)
}

/// Monte Carlo estimator with a configurable trial count and seed.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    iterations: u64,
    seed: Option<u64>,
    parallel: bool,
}

impl MonteCarloSimulator {
    pub fn new(iterations: u64) -> Self {
        Self {
            iterations,
            seed: None,
            parallel: false,
        }
    }

    /// Fix the seed so repeated runs produce identical estimates.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Split trials across the rayon pool.
    ///
    /// Trials are divided into a fixed number of chunks, each driven by its
    /// own ChaCha stream, and recombined by summing successes. A seeded run
    /// gives the same estimate for any pool size, though not the same
    /// estimate as the sequential path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Estimate with the simulator's own generator.
    pub fn estimate(&self, probabilities: &[f64]) -> Option<f64> {
        if self.parallel {
            self.estimate_parallel(probabilities)
        } else {
            let mut rng = rng_from_seed(self.seed);
            monte_carlo_compromise_probability(probabilities, self.iterations, &mut rng)
        }
    }

    /// Estimate sequentially with a caller-supplied generator.
    pub fn estimate_with<R: Rng + ?Sized>(
        &self,
        probabilities: &[f64],
        rng: &mut R,
    ) -> Option<f64> {
        monte_carlo_compromise_probability(probabilities, self.iterations, rng)
    }

    /// Closed form and estimate for a threat list.
    pub fn aggregate(&self, threats: &[Threat]) -> AggregateResult {
        let probabilities = included_probabilities(threats);
        let monte_carlo = self.estimate(&probabilities);
        self.result(&probabilities, monte_carlo)
    }

    /// Closed form and estimate for a threat list, with a caller-supplied
    /// generator. Always sequential.
    pub fn aggregate_with<R: Rng + ?Sized>(
        &self,
        threats: &[Threat],
        rng: &mut R,
    ) -> AggregateResult {
        let probabilities = included_probabilities(threats);
        let monte_carlo = self.estimate_with(&probabilities, rng);
        self.result(&probabilities, monte_carlo)
    }

    fn result(&self, probabilities: &[f64], monte_carlo: Option<f64>) -> AggregateResult {
        let analytic = analytic_compromise_probability(probabilities);
        tracing::info!(
            included_threats = probabilities.len(),
            analytic_probability = analytic,
            monte_carlo = ?monte_carlo,
            iterations = self.iterations,
            "independent-threat aggregate"
        );
        AggregateResult {
            analytic,
            monte_carlo,
            iterations: self.iterations,
            included: probabilities.len(),
        }
    }

    fn estimate_parallel(&self, probabilities: &[f64]) -> Option<f64> {
        if self.iterations == 0 {
            return None;
        }
        let base_seed = self.seed.unwrap_or_else(rand::random::<u64>);
        let chunks = PARALLEL_CHUNKS.min(self.iterations);
        let per_chunk = self.iterations / chunks;
        let remainder = self.iterations % chunks;

        let successes: u64 = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let trials = per_chunk + u64::from(chunk < remainder);
                let mut rng = stream_rng(base_seed, chunk);
                count_compromises(probabilities, trials, &mut rng)
            })
            .sum();

        tracing::debug!(
            iterations = self.iterations,
            successes,
            chunks,
            "parallel monte carlo pass complete"
        );
        Some(successes as f64 / self.iterations as f64)
    }
}
