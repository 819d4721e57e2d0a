//! threatrisk-analysis: the risk-quantification engine.
//!
//! - [`dread`]: DREAD scoring and severity classification
//! - [`attack_tree`]: AND/OR attack tree probability folding
//! - [`aggregate`]: independent-threat compromise probability
//! - [`bayesian`]: Beta-Bernoulli posteriors and dynamic Monte Carlo
//! - [`engine`]: the full assessment pipeline

pub mod aggregate;
pub mod attack_tree;
pub mod bayesian;
pub mod dread;
pub mod engine;
pub mod rng;

pub use aggregate::{AggregateResult, MonteCarloSimulator};
pub use attack_tree::{AttackTreeEvaluator, NodeEvaluation};
pub use bayesian::{monte_carlo_dynamic, BayesianThreatState, ObservationLog};
pub use dread::{DreadScorer, ScoredThreat};
pub use engine::{RiskAssessment, RiskEngine};
