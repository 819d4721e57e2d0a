//! Per-threat Beta-Bernoulli posterior.
//!
//! Prior: Beta(alpha0, beta0), uniform Beta(1, 1) by default.
//! Each observed success adds 1 to alpha, each failure adds 1 to beta.
//! Credible interval: central interval via the `statrs` inverse CDF.

use rand::Rng;
use rand_distr::Distribution;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};
use threatrisk_core::constants::{DEFAULT_PRIOR_ALPHA, DEFAULT_PRIOR_BETA};
use threatrisk_core::errors::BayesianError;
use threatrisk_core::types::Threat;

/// Observed outcomes per threat id, in observation order.
pub type ObservationLog = FxHashMap<String, Vec<bool>>;

/// Posterior belief about one threat's success probability.
///
/// Independent of the threat's static `prob`. `alpha` and `beta` stay
/// positive: they start positive and only ever grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct BayesianThreatState {
    threat_id: String,
    alpha: f64,
    beta: f64,
}

/// Wire shape of a posterior state; validated on the way in.
#[derive(Debug, Deserialize)]
pub struct StateRecord {
    pub threat_id: String,
    pub alpha: f64,
    pub beta: f64,
}

impl TryFrom<StateRecord> for BayesianThreatState {
    type Error = BayesianError;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        Self::with_prior(record.threat_id, record.alpha, record.beta)
    }
}

impl BayesianThreatState {
    /// Uniform Beta(1, 1) prior.
    pub fn new(threat_id: impl Into<String>) -> Self {
        Self {
            threat_id: threat_id.into(),
            alpha: DEFAULT_PRIOR_ALPHA,
            beta: DEFAULT_PRIOR_BETA,
        }
    }

    /// Custom prior. Both parameters must be positive and finite.
    pub fn with_prior(
        threat_id: impl Into<String>,
        alpha: f64,
        beta: f64,
    ) -> Result<Self, BayesianError> {
        if !(alpha > 0.0 && alpha.is_finite() && beta > 0.0 && beta.is_finite()) {
            return Err(BayesianError::InvalidPrior { alpha, beta });
        }
        Ok(Self {
            threat_id: threat_id.into(),
            alpha,
            beta,
        })
    }

    pub fn threat_id(&self) -> &str {
        &self.threat_id
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Record one outcome: success bumps alpha, failure bumps beta.
    pub fn update(&mut self, observed_success: bool) {
        if observed_success {
            self.alpha += 1.0;
        } else {
            self.beta += 1.0;
        }
    }

    /// Record a sequence of outcomes in order.
    pub fn observe_all<I: IntoIterator<Item = bool>>(&mut self, outcomes: I) {
        for outcome in outcomes {
            self.update(outcome);
        }
    }

    /// Posterior mean: alpha / (alpha + beta).
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior variance: alpha*beta / ((alpha+beta)^2 * (alpha+beta+1)).
    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Central credible interval containing `level` of the posterior mass.
    ///
    /// Falls back to a narrow band around the mean for very large
    /// parameters, where the inverse CDF loses precision.
    pub fn credible_interval(&self, level: f64) -> (f64, f64) {
        if self.alpha > 1e6 || self.beta > 1e6 {
            let mean = self.mean();
            let epsilon = 1e-6;
            return ((mean - epsilon).max(0.0), (mean + epsilon).min(1.0));
        }

        let tail = (1.0 - level.clamp(0.0, 1.0)) / 2.0;
        match Beta::new(self.alpha, self.beta) {
            Ok(dist) => {
                let low = dist.inverse_cdf(tail);
                let high = dist.inverse_cdf(1.0 - tail);
                let low = if low.is_finite() { low.clamp(0.0, 1.0) } else { 0.0 };
                let high = if high.is_finite() { high.clamp(0.0, 1.0) } else { 1.0 };
                (low, high)
            }
            Err(_) => (0.0, 1.0),
        }
    }

    /// One draw from the current posterior. Not memoized: every call is an
    /// independent draw.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match rand_distr::Beta::new(self.alpha, self.beta) {
            Ok(dist) => dist.sample(rng),
            Err(_) => self.mean(),
        }
    }
}

/// One fresh state per threat id, all starting from the same prior.
///
/// A repeated id keeps a single state at its first position; the last record
/// wins, as in [`ThreatIndex`](threatrisk_core::types::ThreatIndex).
pub fn states_for_threats<'a, I>(
    threats: I,
    prior: (f64, f64),
) -> Result<Vec<BayesianThreatState>, BayesianError>
where
    I: IntoIterator<Item = &'a Threat>,
{
    let (alpha, beta) = prior;
    let mut states: Vec<BayesianThreatState> = Vec::new();
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for threat in threats {
        let state = BayesianThreatState::with_prior(threat.id.clone(), alpha, beta)?;
        match positions.get(threat.id.as_str()) {
            Some(&position) => {
                tracing::warn!(
                    threat_id = %threat.id,
                    "duplicate threat id in catalog, last record wins"
                );
                states[position] = state;
            }
            None => {
                positions.insert(threat.id.as_str(), states.len());
                states.push(state);
            }
        }
    }
    Ok(states)
}

/// Feed logged outcomes to the matching states.
///
/// Returns the number of outcomes applied. Each logged sequence is applied
/// once: when several states share an id only the last one is updated. Log
/// entries for ids without a state are skipped.
pub fn apply_observations(states: &mut [BayesianThreatState], log: &ObservationLog) -> usize {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for (position, state) in states.iter().enumerate() {
        if positions.insert(state.threat_id(), position).is_some() {
            tracing::warn!(
                threat_id = %state.threat_id(),
                "duplicate posterior state, last state wins"
            );
        }
    }

    let mut targets: Vec<(usize, &[bool])> = Vec::with_capacity(log.len());
    for (id, outcomes) in log {
        match positions.get(id.as_str()) {
            Some(&position) => targets.push((position, outcomes.as_slice())),
            None => tracing::warn!(threat_id = %id, "observations for unknown threat skipped"),
        }
    }

    let mut applied = 0;
    for (position, outcomes) in targets {
        states[position].observe_all(outcomes.iter().copied());
        applied += outcomes.len();
    }
    tracing::debug!(observations = applied, "observations applied");
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::rng_from_seed;

    #[test]
    fn test_uniform_prior() {
        let state = BayesianThreatState::new("T1");
        assert_eq!((state.alpha(), state.beta()), (1.0, 1.0));
        assert!((state.mean() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_two_successes_three_failures() {
        let mut state = BayesianThreatState::new("T1");
        state.observe_all([true, false, true, false, false]);
        assert_eq!(state.alpha(), 3.0);
        assert_eq!(state.beta(), 4.0);
        assert!((state.mean() - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_increments_exactly_one() {
        let mut state = BayesianThreatState::new("T1");
        state.update(true);
        assert_eq!((state.alpha(), state.beta()), (2.0, 1.0));
        state.update(false);
        assert_eq!((state.alpha(), state.beta()), (2.0, 2.0));
    }

    #[test]
    fn test_invalid_prior_rejected() {
        assert!(BayesianThreatState::with_prior("T1", 0.0, 1.0).is_err());
        assert!(BayesianThreatState::with_prior("T1", 1.0, -2.0).is_err());
        assert!(BayesianThreatState::with_prior("T1", f64::INFINITY, 1.0).is_err());
        assert!(BayesianThreatState::with_prior("T1", 0.5, 0.5).is_ok());
    }

    #[test]
    fn test_credible_interval_narrows_with_evidence() {
        let mut state = BayesianThreatState::new("T1");
        let (l1, h1) = state.credible_interval(0.95);
        state.observe_all(
            std::iter::repeat(true)
                .take(20)
                .chain(std::iter::repeat(false).take(20)),
        );
        let (l2, h2) = state.credible_interval(0.95);
        assert!(h2 - l2 < h1 - l1);
        assert!(l2 < 0.5 && 0.5 < h2);
    }

    #[test]
    fn test_samples_in_unit_interval() {
        let state = BayesianThreatState::with_prior("T1", 2.0, 5.0).unwrap();
        let mut rng = rng_from_seed(Some(42));
        for _ in 0..1000 {
            let x = state.sample(&mut rng);
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn test_apply_observations_skips_unknown() {
        let mut states = vec![BayesianThreatState::new("T1"), BayesianThreatState::new("T2")];
        let mut log = ObservationLog::default();
        log.insert("T1".into(), vec![true, true]);
        log.insert("ghost".into(), vec![false]);
        assert_eq!(apply_observations(&mut states, &log), 2);
        assert_eq!(states[0].alpha(), 3.0);
        assert_eq!(states[1].alpha(), 1.0);
    }

    #[test]
    fn test_duplicate_ids_share_one_state() {
        let threats = [
            Threat::new("T1").with_prob(0.1),
            Threat::new("T2").with_prob(0.2),
            Threat::new("T1").with_prob(0.3),
        ];
        let states = states_for_threats(&threats, (1.0, 1.0)).unwrap();
        let ids: Vec<&str> = states.iter().map(|s| s.threat_id()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);
    }

    #[test]
    fn test_duplicate_states_updated_once() {
        let mut states = vec![BayesianThreatState::new("T1"), BayesianThreatState::new("T1")];
        let mut log = ObservationLog::default();
        log.insert("T1".into(), vec![true, true, false]);
        assert_eq!(apply_observations(&mut states, &log), 3);
        assert_eq!((states[0].alpha(), states[0].beta()), (1.0, 1.0));
        assert_eq!((states[1].alpha(), states[1].beta()), (3.0, 2.0));
    }
}
