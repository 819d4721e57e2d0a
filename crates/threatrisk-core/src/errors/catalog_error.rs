//! Threat catalog validation errors.

use super::error_code::{self, RiskErrorCode};

/// Errors raised while validating raw threat records at the boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Threat catalog must be an array, got {found}")]
    NotAnArray { found: String },

    #[error("Threat record is missing required field '{field}'")]
    MissingField { field: String },

    #[error("Threat {threat_id}: cannot convert {field} value {value} to a number")]
    TypeConversion {
        threat_id: String,
        field: String,
        value: String,
    },

    #[error("Threat {threat_id}: probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { threat_id: String, value: f64 },

    #[error("Threat record is malformed: {message}")]
    Malformed { message: String },

    #[error("Threat record {index}: {source}")]
    InRecord {
        index: usize,
        #[source]
        source: Box<CatalogError>,
    },
}

impl RiskErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        error_code::CATALOG_ERROR
    }
}
