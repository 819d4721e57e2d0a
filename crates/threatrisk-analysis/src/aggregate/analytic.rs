//! Closed-form compromise probability.

use threatrisk_core::types::Threat;

/// Threats that carry a probability, in catalog order. Only these take part
/// in aggregation and in the posterior pass layered on top of it.
pub fn included_threats<'a, I>(threats: I) -> impl Iterator<Item = &'a Threat>
where
    I: IntoIterator<Item = &'a Threat>,
{
    threats.into_iter().filter(|t| t.prob.is_some())
}

/// Probabilities of the threats that carry one, in catalog order.
pub fn included_probabilities<'a, I>(threats: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Threat>,
{
    included_threats(threats).filter_map(|t| t.prob).collect()
}

/// `1 - Π(1 - p_i)`: probability that at least one independent threat
/// succeeds. An empty list yields 0.0.
pub fn analytic_compromise_probability(probabilities: &[f64]) -> f64 {
    1.0 - probabilities.iter().map(|p| 1.0 - p).product::<f64>()
}
