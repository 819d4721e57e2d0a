//! Risk engine: scores a catalog, aggregates it, evaluates the attack tree,
//! and optionally re-estimates probabilities from observed outcomes.

pub mod risk_engine;
pub mod types;

pub use risk_engine::RiskEngine;
pub use types::{DynamicAssessment, PosteriorSummary, RiskAssessment, TreeAssessment};
