//! Aggregate result type.

use serde::Serialize;

/// Compromise probability of a flat threat list, both ways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Closed-form `1 - Π(1 - p_i)`.
    pub analytic: f64,
    /// Monte Carlo estimate; `None` when no trials were run.
    pub monte_carlo: Option<f64>,
    /// Trials run for the estimate.
    pub iterations: u64,
    /// Threats that carried a probability.
    pub included: usize,
}

impl AggregateResult {
    /// Absolute gap between the estimate and the closed form, if estimated.
    pub fn divergence(&self) -> Option<f64> {
        self.monte_carlo.map(|mc| (mc - self.analytic).abs())
    }
}
