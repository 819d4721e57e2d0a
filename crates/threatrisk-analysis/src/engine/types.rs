//! Assessment result types.

use serde::Serialize;

use crate::aggregate::AggregateResult;
use crate::attack_tree::NodeEvaluation;
use crate::bayesian::BayesianThreatState;
use crate::dread::ScoredThreat;

/// Attack tree outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeAssessment {
    /// Display label of the tree root.
    pub label: String,
    pub probability: f64,
    pub breakdown: NodeEvaluation,
}

/// Posterior of one threat after the observations were applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorSummary {
    pub threat_id: String,
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
    pub credible_interval: (f64, f64),
}

impl PosteriorSummary {
    pub fn from_state(state: &BayesianThreatState, level: f64) -> Self {
        Self {
            threat_id: state.threat_id().to_string(),
            alpha: state.alpha(),
            beta: state.beta(),
            mean: state.mean(),
            credible_interval: state.credible_interval(level),
        }
    }
}

/// Bayesian re-estimation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicAssessment {
    pub posteriors: Vec<PosteriorSummary>,
    /// Dynamic Monte Carlo estimate; `None` when no trials were run.
    pub probability: Option<f64>,
    /// Closed-form compromise probability over the posterior means.
    pub posterior_mean_probability: f64,
    pub iterations: u64,
}

/// Everything one assessment produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Scored threats, highest score first.
    pub threats: Vec<ScoredThreat>,
    pub aggregate: AggregateResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicAssessment>,
}
