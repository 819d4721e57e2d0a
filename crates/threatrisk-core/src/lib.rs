//! threatrisk-core: data model, boundary validation, errors, configuration,
//! tracing setup, and shared constants for the threatrisk engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::RiskConfig;
pub use errors::{RiskError, RiskErrorCode};
pub use types::{
    AttackTree, AttackTreeNode, DreadRatings, GateLogic, Severity, SeverityThresholds, Threat,
    ThreatIndex, ThresholdPreset,
};
