//! Lookup from threat id to standalone probability.

use rustc_hash::FxHashMap;

use super::threat::Threat;

/// Threat id → probability index used to resolve attack tree references.
///
/// A threat without a probability is still indexed, so callers can tell
/// "unknown id" apart from "known threat, no probability".
#[derive(Debug, Clone, Default)]
pub struct ThreatIndex {
    probabilities: FxHashMap<String, Option<f64>>,
}

impl ThreatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a catalog. On duplicate ids the last record wins.
    pub fn from_threats<'a, I>(threats: I) -> Self
    where
        I: IntoIterator<Item = &'a Threat>,
    {
        let mut index = Self::new();
        for threat in threats {
            index.insert(&threat.id, threat.prob);
        }
        index
    }

    pub fn insert(&mut self, id: &str, prob: Option<f64>) {
        if self.probabilities.insert(id.to_string(), prob).is_some() {
            tracing::warn!(threat_id = %id, "duplicate threat id in catalog, last record wins");
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.probabilities.contains_key(id)
    }

    /// The threat's probability, if the id is known and carries one.
    pub fn resolve(&self, id: &str) -> Option<f64> {
        self.probabilities.get(id).copied().flatten()
    }

    /// The threat's probability, or 0.0 for unknown ids and threats without
    /// a probability.
    pub fn probability(&self, id: &str) -> f64 {
        self.resolve(id).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

impl<'a> FromIterator<&'a Threat> for ThreatIndex {
    fn from_iter<I: IntoIterator<Item = &'a Threat>>(iter: I) -> Self {
        Self::from_threats(iter)
    }
}
