//! Bayesian re-estimation of threat probabilities.
//!
//! Each threat carries a Beta(alpha, beta) posterior over its success
//! probability, starting from a prior (uniform by default) and updated by
//! observed outcomes. The dynamic Monte Carlo pass re-samples every
//! posterior on every trial, so the estimate reflects parameter uncertainty
//! as well as sampling noise.

pub mod beta;
pub mod dynamic;

pub use beta::{apply_observations, states_for_threats, BayesianThreatState, ObservationLog};
pub use dynamic::{monte_carlo_dynamic, posterior_means};
