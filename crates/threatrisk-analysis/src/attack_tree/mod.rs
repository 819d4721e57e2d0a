//! Attack tree evaluation.
//!
//! Folds a tree of AND/OR gates over threat references into a single success
//! probability. Children are combined under an independence assumption:
//! AND is the product of child probabilities, OR is the complement of the
//! product of complements. Correlated threats are mis-estimated by this
//! model.

pub mod evaluator;
pub mod types;

pub use evaluator::{combine_and, combine_or, AttackTreeEvaluator};
pub use types::{NodeEvaluation, NodeKind};
