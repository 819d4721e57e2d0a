//! Independent-threat aggregation: probability that at least one threat in a
//! flat catalog succeeds, in closed form and by Monte Carlo sampling.
//!
//! Threats without a probability are excluded rather than counted as 0.

pub mod analytic;
pub mod monte_carlo;
pub mod types;

pub use analytic::{analytic_compromise_probability, included_probabilities, included_threats};
pub use monte_carlo::{count_compromises, monte_carlo_compromise_probability, MonteCarloSimulator};
pub use types::AggregateResult;
