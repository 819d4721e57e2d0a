//! Attack tree errors.

use super::error_code::{self, RiskErrorCode};

/// Errors raised for malformed attack tree nodes or strict logic checks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("Attack tree node has neither 'ref' nor 'children'")]
    MissingRefAndChildren,

    #[error("Attack tree reference '{threat_ref}' must not have children")]
    ReferenceWithChildren { threat_ref: String },

    #[error("Attack tree is malformed: {message}")]
    Malformed { message: String },

    #[error("Unrecognized gate logic '{logic}' (expected AND or OR)")]
    UnrecognizedLogic { logic: String },
}

impl RiskErrorCode for TreeError {
    fn error_code(&self) -> &'static str {
        error_code::TREE_ERROR
    }
}
