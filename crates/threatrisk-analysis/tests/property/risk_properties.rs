use proptest::prelude::*;
use threatrisk_analysis::aggregate::analytic_compromise_probability;
use threatrisk_analysis::attack_tree::{combine_and, combine_or, AttackTreeEvaluator};
use threatrisk_analysis::bayesian::BayesianThreatState;
use threatrisk_analysis::dread::{dread_score, DreadScorer};
use threatrisk_core::types::{AttackTreeNode, DreadRatings, Threat, ThreatIndex};

fn arb_ratings() -> impl Strategy<Value = DreadRatings> {
    prop::array::uniform5(0.0f64..=10.0)
        .prop_map(|[d, r, e, a, di]| DreadRatings::new(d, r, e, a, di))
}

fn arb_probabilities() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=1.0, 0..12)
}

// ── DREAD score ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn score_is_mean_and_bounded(ratings in arb_ratings()) {
        let score = dread_score(&ratings);
        let expected = ratings.values().iter().sum::<f64>() / 5.0;
        prop_assert!((score - expected).abs() < 1e-12);
        prop_assert!((0.0..=10.0).contains(&score));
    }
}

proptest! {
    #[test]
    fn severity_is_monotone(a in 0.0f64..=10.0, b in 0.0f64..=10.0) {
        let scorer = DreadScorer::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(scorer.severity(low) <= scorer.severity(high));
    }
}

proptest! {
    #[test]
    fn rescoring_is_idempotent(ratings in arb_ratings()) {
        let scorer = DreadScorer::default();
        let once = scorer.score(&Threat::new("T1").with_dread(ratings));
        let twice = scorer.rescore(&once);
        prop_assert_eq!(once, twice);
    }
}

// ── Attack tree gates ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn and_gate_is_product(probs in prop::collection::vec(0.0f64..=1.0, 1..8)) {
        let threats: Vec<Threat> = probs
            .iter()
            .enumerate()
            .map(|(i, p)| Threat::new(format!("T{i}")).with_prob(*p))
            .collect();
        let index = ThreatIndex::from_threats(&threats);
        let node = AttackTreeNode::and(
            threats.iter().map(|t| AttackTreeNode::reference(t.id.clone())).collect(),
        );
        let p = AttackTreeEvaluator::default().evaluate(Some(&node), &index).unwrap();
        prop_assert!((p - probs.iter().product::<f64>()).abs() < 1e-12);
    }
}

proptest! {
    #[test]
    fn or_gate_is_complement_of_product(probs in prop::collection::vec(0.0f64..=1.0, 1..8)) {
        let threats: Vec<Threat> = probs
            .iter()
            .enumerate()
            .map(|(i, p)| Threat::new(format!("T{i}")).with_prob(*p))
            .collect();
        let index = ThreatIndex::from_threats(&threats);
        let node = AttackTreeNode::or(
            threats.iter().map(|t| AttackTreeNode::reference(t.id.clone())).collect(),
        );
        let p = AttackTreeEvaluator::default().evaluate(Some(&node), &index).unwrap();
        let expected = 1.0 - probs.iter().map(|p| 1.0 - p).product::<f64>();
        prop_assert!((p - expected).abs() < 1e-12);
    }
}

proptest! {
    #[test]
    fn gates_stay_in_unit_interval(probs in arb_probabilities()) {
        let and = combine_and(&probs);
        let or = combine_or(&probs);
        prop_assert!((0.0..=1.0).contains(&and));
        prop_assert!((0.0..=1.0).contains(&or));
        prop_assert!(and <= or + 1e-12);
    }
}

// ── Aggregate ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn analytic_probability_in_unit_interval(probs in arb_probabilities()) {
        let p = analytic_compromise_probability(&probs);
        prop_assert!((0.0..=1.0).contains(&p));
        if let Some(max) = probs.iter().cloned().reduce(f64::max) {
            prop_assert!(p + 1e-12 >= max);
        }
    }
}

// ── Posterior ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn posterior_counts_match_outcomes(outcomes in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut state = BayesianThreatState::new("T1");
        state.observe_all(outcomes.iter().copied());
        let successes = outcomes.iter().filter(|o| **o).count() as f64;
        let failures = outcomes.len() as f64 - successes;
        prop_assert_eq!(state.alpha(), 1.0 + successes);
        prop_assert_eq!(state.beta(), 1.0 + failures);
        prop_assert!(state.mean() > 0.0 && state.mean() < 1.0);
    }
}
