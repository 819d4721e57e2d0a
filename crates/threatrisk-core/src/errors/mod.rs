//! Error handling for threatrisk.
//! One error enum per subsystem, `thiserror` only.

pub mod bayesian_error;
pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod risk_error;
pub mod tree_error;

pub use bayesian_error::BayesianError;
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::RiskErrorCode;
pub use risk_error::RiskError;
pub use tree_error::TreeError;
