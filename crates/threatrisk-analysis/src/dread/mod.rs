//! DREAD scoring: a pure mapping from raw threats to scored threats.
//!
//! score = mean(damage, reproducibility, exploitability, affected_users,
//! discoverability), missing ratings counted as 0. Severity is a step
//! function of the score through a configurable threshold table.

pub mod scorer;
pub mod types;

pub use scorer::{dread_score, rank_threats, DreadScorer};
pub use types::ScoredThreat;
