//! Bayesian updater errors.

use super::error_code::{self, RiskErrorCode};

/// Errors raised when constructing posterior states.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BayesianError {
    #[error("Invalid Beta prior ({alpha}, {beta}): both parameters must be positive and finite")]
    InvalidPrior { alpha: f64, beta: f64 },
}

impl RiskErrorCode for BayesianError {
    fn error_code(&self) -> &'static str {
        error_code::BAYESIAN_ERROR
    }
}
