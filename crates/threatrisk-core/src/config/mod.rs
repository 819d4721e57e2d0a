//! Configuration system for threatrisk.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod risk_config;
pub mod scoring_config;
pub mod simulation_config;
pub mod tree_config;

pub use risk_config::{ConfigOverrides, RiskConfig};
pub use scoring_config::ScoringConfig;
pub use simulation_config::SimulationConfig;
pub use tree_config::{LogicPolicy, TreeConfig};
