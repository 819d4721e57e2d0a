//! Dynamic Monte Carlo over posterior states.

use rand::Rng;

use super::beta::BayesianThreatState;

/// Fraction of compromised trials when every trial re-samples each threat's
/// probability from its posterior.
///
/// Per trial: draw `p_i ~ Beta(alpha_i, beta_i)` for every state, then
/// activate threat `i` when a uniform draw is below `p_i`. The trial is a
/// compromise when any threat activates. States are read, never updated.
///
/// Returns `None` when `iterations` is zero, matching the static estimator.
pub fn monte_carlo_dynamic<R: Rng + ?Sized>(
    states: &[BayesianThreatState],
    iterations: u64,
    rng: &mut R,
) -> Option<f64> {
    if iterations == 0 {
        return None;
    }

    let mut successes: u64 = 0;
    for _ in 0..iterations {
        let mut compromised = false;
        for state in states {
            let p = state.sample(rng);
            if rng.gen::<f64>() < p {
                compromised = true;
            }
        }
        if compromised {
            successes += 1;
        }
    }

    tracing::debug!(
        iterations,
        successes,
        threat_count = states.len(),
        "dynamic monte carlo pass complete"
    );
    Some(successes as f64 / iterations as f64)
}

/// Posterior mean of every state, in order. As evidence accumulates the
/// dynamic estimate converges to the static estimate over these values.
pub fn posterior_means(states: &[BayesianThreatState]) -> Vec<f64> {
    states.iter().map(BayesianThreatState::mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::analytic_compromise_probability;
    use crate::rng::rng_from_seed;

    #[test]
    fn test_zero_iterations_is_undefined() {
        let states = vec![BayesianThreatState::new("T1")];
        let mut rng = rng_from_seed(Some(5));
        assert_eq!(monte_carlo_dynamic(&states, 0, &mut rng), None);
    }

    #[test]
    fn test_no_states_never_compromised() {
        let mut rng = rng_from_seed(Some(5));
        assert_eq!(monte_carlo_dynamic(&[], 1000, &mut rng), Some(0.0));
    }

    #[test]
    fn test_peaked_posterior_converges() {
        let state = BayesianThreatState::with_prior("T1", 3_000.0, 7_000.0).unwrap();
        let mut rng = rng_from_seed(Some(11));
        let p = monte_carlo_dynamic(&[state], 20_000, &mut rng).unwrap();
        assert!((p - 0.3).abs() < 0.02, "dynamic estimate {p}");
    }

    #[test]
    fn test_uniform_prior_behaves_like_half() {
        // Marginally, Bernoulli(p) with p ~ Beta(1, 1) succeeds half the time.
        let mut rng = rng_from_seed(Some(23));
        let states = [BayesianThreatState::new("T1")];
        let p = monte_carlo_dynamic(&states, 20_000, &mut rng).unwrap();
        assert!((p - 0.5).abs() < 0.02, "dynamic estimate {p}");
    }

    #[test]
    fn test_matches_posterior_mean_closed_form() {
        let mut a = BayesianThreatState::new("T1");
        a.observe_all(
            std::iter::repeat(false)
                .take(400)
                .chain(std::iter::repeat(true).take(100)),
        );
        let mut b = BayesianThreatState::new("T2");
        b.observe_all(
            std::iter::repeat(false)
                .take(300)
                .chain(std::iter::repeat(true).take(100)),
        );
        let states = vec![a, b];

        let expected = analytic_compromise_probability(&posterior_means(&states));
        let mut rng = rng_from_seed(Some(77));
        let p = monte_carlo_dynamic(&states, 20_000, &mut rng).unwrap();
        assert!((p - expected).abs() < 0.02, "dynamic {p} vs closed form {expected}");
    }
}
