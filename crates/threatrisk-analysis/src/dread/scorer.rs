//! DREAD scorer and ranking.

use std::cmp::Ordering;

use threatrisk_core::types::{DreadRatings, Severity, SeverityThresholds, Threat};

use super::types::ScoredThreat;

/// Mean of the five DREAD sub-ratings.
pub fn dread_score(ratings: &DreadRatings) -> f64 {
    let values = ratings.values();
    values.iter().sum::<f64>() / values.len() as f64
}

/// Scores threats against a severity threshold table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DreadScorer {
    thresholds: SeverityThresholds,
}

impl DreadScorer {
    pub fn new(thresholds: SeverityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SeverityThresholds {
        &self.thresholds
    }

    pub fn severity(&self, score: f64) -> Severity {
        self.thresholds.classify(score)
    }

    /// Score one threat. The input is left untouched.
    pub fn score(&self, threat: &Threat) -> ScoredThreat {
        let score = dread_score(&threat.dread);
        ScoredThreat::new(threat.clone(), score, self.severity(score))
    }

    /// Recompute score and severity from the embedded ratings.
    /// Scoring an already-scored threat yields the same result.
    pub fn rescore(&self, scored: &ScoredThreat) -> ScoredThreat {
        self.score(scored.threat())
    }

    pub fn score_all(&self, threats: &[Threat]) -> Vec<ScoredThreat> {
        let scored: Vec<ScoredThreat> = threats.iter().map(|t| self.score(t)).collect();
        tracing::debug!(threat_count = scored.len(), "scored catalog");
        scored
    }
}

/// Order threats by score descending, then id ascending.
pub fn rank_threats(mut scored: Vec<ScoredThreat>) -> Vec<ScoredThreat> {
    scored.sort_by(|a, b| match b.score().total_cmp(&a.score()) {
        Ordering::Equal => a.id().cmp(b.id()),
        other => other,
    });
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat(id: &str, ratings: [f64; 5]) -> Threat {
        let [d, r, e, a, di] = ratings;
        Threat::new(id).with_dread(DreadRatings::new(d, r, e, a, di))
    }

    #[test]
    fn test_score_is_mean_of_five() {
        let scored = DreadScorer::default().score(&threat("T1", [8.0, 9.0, 7.0, 6.0, 8.0]));
        assert!((scored.score() - 7.6).abs() < 1e-12);
        assert_eq!(scored.severity(), Severity::High);
    }

    #[test]
    fn test_no_ratings_scores_zero() {
        let scored = DreadScorer::default().score(&Threat::new("T0"));
        assert_eq!(scored.score(), 0.0);
        assert_eq!(scored.severity(), Severity::None);
    }

    #[test]
    fn test_partial_ratings_divide_by_five() {
        let scored = DreadScorer::default().score(&threat("T1", [10.0, 0.0, 0.0, 0.0, 0.0]));
        assert_eq!(scored.score(), 2.0);
        assert_eq!(scored.severity(), Severity::Low);
    }

    #[test]
    fn test_legacy_table_changes_tier() {
        let t = threat("T1", [6.0, 6.0, 6.0, 6.0, 6.0]);
        assert_eq!(DreadScorer::default().score(&t).severity(), Severity::Medium);
        assert_eq!(
            DreadScorer::new(SeverityThresholds::legacy()).score(&t).severity(),
            Severity::High
        );
    }

    #[test]
    fn test_rescore_idempotent() {
        let scorer = DreadScorer::default();
        let once = scorer.score(&threat("T1", [5.0, 6.0, 7.0, 8.0, 9.0]));
        let twice = scorer.rescore(&once);
        let thrice = scorer.rescore(&twice);
        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
    }

    #[test]
    fn test_rank_by_score_then_id() {
        let scorer = DreadScorer::default();
        let ranked = rank_threats(scorer.score_all(&[
            threat("T3", [5.0; 5]),
            threat("T1", [2.0; 5]),
            threat("T2", [5.0; 5]),
            threat("T0", [9.0; 5]),
        ]));
        let ids: Vec<&str> = ranked.iter().map(ScoredThreat::id).collect();
        assert_eq!(ids, vec!["T0", "T2", "T3", "T1"]);
    }
}
