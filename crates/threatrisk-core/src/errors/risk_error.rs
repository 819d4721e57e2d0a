//! Top-level error for a full risk assessment.

use super::error_code::RiskErrorCode;
use super::{BayesianError, CatalogError, ConfigError, TreeError};

/// Errors that abort a risk assessment.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Attack tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Bayesian error: {0}")]
    Bayesian(#[from] BayesianError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RiskErrorCode for RiskError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Tree(e) => e.error_code(),
            Self::Bayesian(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
