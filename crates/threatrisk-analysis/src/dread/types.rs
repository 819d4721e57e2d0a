//! Scored threat records.

use serde::Serialize;
use threatrisk_core::types::{Severity, Threat};

/// A threat enriched with its derived DREAD score and severity.
///
/// Only [`DreadScorer`](super::DreadScorer) constructs these, so a score is
/// never observable before it has been computed from the current ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredThreat {
    #[serde(flatten)]
    threat: Threat,
    score: f64,
    severity: Severity,
}

impl ScoredThreat {
    pub(crate) fn new(threat: Threat, score: f64, severity: Severity) -> Self {
        Self {
            threat,
            score,
            severity,
        }
    }

    pub fn threat(&self) -> &Threat {
        &self.threat
    }

    pub fn id(&self) -> &str {
        &self.threat.id
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Drop the derived fields, e.g. to edit the ratings and rescore.
    pub fn into_threat(self) -> Threat {
        self.threat
    }
}
