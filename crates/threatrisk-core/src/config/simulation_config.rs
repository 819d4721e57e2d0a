//! Monte Carlo and Bayesian prior configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ITERATIONS, DEFAULT_PRIOR_ALPHA, DEFAULT_PRIOR_BETA};

/// Configuration for the sampling estimators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Monte Carlo trials per estimate. Default: 10,000. Zero disables the
    /// estimate (reported as undefined).
    pub iterations: Option<u64>,
    /// RNG seed. When unset, every run draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
    /// Split static Monte Carlo trials across the rayon pool. Default: false.
    pub parallel: Option<bool>,
    /// Beta prior alpha for every threat. Default: 1.0.
    pub prior_alpha: Option<f64>,
    /// Beta prior beta for every threat. Default: 1.0.
    pub prior_beta: Option<f64>,
}

impl SimulationConfig {
    /// Returns the effective iteration count, defaulting to 10,000.
    pub fn effective_iterations(&self) -> u64 {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    /// Returns whether the parallel path is enabled, defaulting to false.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }

    /// Returns the effective (alpha, beta) prior, defaulting to (1, 1).
    pub fn effective_prior(&self) -> (f64, f64) {
        (
            self.prior_alpha.unwrap_or(DEFAULT_PRIOR_ALPHA),
            self.prior_beta.unwrap_or(DEFAULT_PRIOR_BETA),
        )
    }
}
