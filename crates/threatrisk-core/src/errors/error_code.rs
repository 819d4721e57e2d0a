//! RiskErrorCode trait for outer-surface error reporting.

/// Trait for mapping threatrisk errors to stable error code strings.
/// Every error enum implements this so reporters and CLIs can match on
/// a code instead of parsing messages.
pub trait RiskErrorCode {
    /// Returns the error code string (e.g., "CATALOG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const TREE_ERROR: &str = "TREE_ERROR";
pub const BAYESIAN_ERROR: &str = "BAYESIAN_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
