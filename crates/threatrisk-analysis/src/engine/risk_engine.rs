//! RiskEngine: runs the full assessment pipeline from a `RiskConfig`.
//!
//! catalog → validate → DREAD score → rank
//!         → independent-threat aggregate (closed form + Monte Carlo)
//!         → attack tree (optional)
//!         → posterior update + dynamic Monte Carlo (optional)

use threatrisk_core::config::RiskConfig;
use threatrisk_core::constants::{
    DEFAULT_CREDIBLE_LEVEL, DEFAULT_ITERATIONS, DEFAULT_PRIOR_ALPHA, DEFAULT_PRIOR_BETA,
};
use threatrisk_core::errors::{CatalogError, RiskError};
use threatrisk_core::types::{AttackTree, Threat, ThreatIndex};
use tracing::{debug, info};

use super::types::{DynamicAssessment, PosteriorSummary, RiskAssessment, TreeAssessment};
use crate::aggregate::{analytic_compromise_probability, included_threats, MonteCarloSimulator};
use crate::attack_tree::AttackTreeEvaluator;
use crate::bayesian::{
    apply_observations, monte_carlo_dynamic, posterior_means, states_for_threats, ObservationLog,
};
use crate::dread::{rank_threats, DreadScorer};
use crate::rng::{rng_from_seed, RiskRng};

/// The assessment pipeline.
///
/// One assessment consumes one RNG stream, seeded from the configured seed
/// when present, so seeded assessments are reproducible end to end.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    scorer: DreadScorer,
    evaluator: AttackTreeEvaluator,
    iterations: u64,
    seed: Option<u64>,
    parallel: bool,
    prior: (f64, f64),
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Result<Self, RiskError> {
        RiskConfig::validate(&config)?;
        Ok(Self {
            scorer: DreadScorer::new(config.scoring.effective_thresholds()?),
            evaluator: AttackTreeEvaluator::new(config.tree.effective_logic_policy()),
            iterations: config.simulation.effective_iterations(),
            seed: config.simulation.seed,
            parallel: config.simulation.effective_parallel(),
            prior: config.simulation.effective_prior(),
        })
    }

    /// Override the configured seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn scorer(&self) -> &DreadScorer {
        &self.scorer
    }

    pub fn evaluator(&self) -> &AttackTreeEvaluator {
        &self.evaluator
    }

    /// Run a full assessment.
    ///
    /// Fails fast on a threat that violates the catalog invariants or on a
    /// tree the evaluator rejects. Nothing is partially reported.
    pub fn assess(
        &self,
        threats: &[Threat],
        tree: Option<&AttackTree>,
        observations: Option<&ObservationLog>,
    ) -> Result<RiskAssessment, RiskError> {
        for (index, threat) in threats.iter().enumerate() {
            threat.validate().map_err(|source| CatalogError::InRecord {
                index,
                source: Box::new(source),
            })?;
        }
        debug!(threat_count = threats.len(), "catalog validated");

        let scored = rank_threats(self.scorer.score_all(threats));
        let mut rng = rng_from_seed(self.seed);

        let aggregate = match self.parallel_simulator() {
            Some(simulator) => simulator.aggregate(threats),
            None => MonteCarloSimulator::new(self.iterations).aggregate_with(threats, &mut rng),
        };

        let tree = match tree {
            Some(tree) => Some(self.assess_tree(tree, threats)?),
            None => None,
        };

        let dynamic = match observations {
            Some(log) => Some(self.assess_dynamic(threats, log, &mut rng)?),
            None => None,
        };

        info!(
            threat_count = scored.len(),
            analytic_probability = aggregate.analytic,
            tree_probability = ?tree.as_ref().map(|t| t.probability),
            dynamic_probability = ?dynamic.as_ref().and_then(|d| d.probability),
            "risk assessment complete"
        );

        Ok(RiskAssessment {
            threats: scored,
            aggregate,
            tree,
            dynamic,
        })
    }

    /// The parallel simulator, when enabled. Parallel runs derive their own
    /// per-chunk streams from the seed instead of sharing `rng`.
    fn parallel_simulator(&self) -> Option<MonteCarloSimulator> {
        if !self.parallel {
            return None;
        }
        let simulator = MonteCarloSimulator::new(self.iterations).with_parallel(true);
        Some(match self.seed {
            Some(seed) => simulator.with_seed(seed),
            None => simulator,
        })
    }

    fn assess_tree(
        &self,
        tree: &AttackTree,
        threats: &[Threat],
    ) -> Result<TreeAssessment, RiskError> {
        let index = ThreatIndex::from_threats(threats);
        let breakdown = self.evaluator.explain(&tree.node, &index)?;
        let unresolved = breakdown.unresolved_refs();
        if !unresolved.is_empty() {
            debug!(?unresolved, "tree references without a probability contribute 0.0");
        }
        info!(
            tree = tree.label(),
            tree_probability = breakdown.probability,
            "attack tree evaluated"
        );
        Ok(TreeAssessment {
            label: tree.label().to_string(),
            probability: breakdown.probability,
            breakdown,
        })
    }

    fn assess_dynamic(
        &self,
        threats: &[Threat],
        log: &ObservationLog,
        rng: &mut RiskRng,
    ) -> Result<DynamicAssessment, RiskError> {
        // Same inputs as the aggregate: unrated threats get no posterior.
        let mut states = states_for_threats(included_threats(threats), self.prior)?;
        apply_observations(&mut states, log);

        let probability = monte_carlo_dynamic(&states, self.iterations, rng);
        let posterior_mean_probability =
            analytic_compromise_probability(&posterior_means(&states));

        Ok(DynamicAssessment {
            posteriors: states
                .iter()
                .map(|s| PosteriorSummary::from_state(s, DEFAULT_CREDIBLE_LEVEL))
                .collect(),
            probability,
            posterior_mean_probability,
            iterations: self.iterations,
        })
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self {
            scorer: DreadScorer::default(),
            evaluator: AttackTreeEvaluator::default(),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            parallel: false,
            prior: (DEFAULT_PRIOR_ALPHA, DEFAULT_PRIOR_BETA),
        }
    }
}
