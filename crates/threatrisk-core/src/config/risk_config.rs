//! Top-level threatrisk configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LogicPolicy, ScoringConfig, SimulationConfig, TreeConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;
use crate::types::ThresholdPreset;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`THREATRISK_*`)
/// 3. Project config (`threatrisk.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskConfig {
    pub scoring: ScoringConfig,
    pub simulation: SimulationConfig,
    pub tree: TreeConfig,
}

/// Caller-supplied overrides, usually from a command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub iterations: Option<u64>,
    pub seed: Option<u64>,
    pub parallel: Option<bool>,
    pub threshold_preset: Option<ThresholdPreset>,
    pub logic_policy: Option<LogicPolicy>,
}

impl RiskConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        tracing::debug!(
            iterations = config.simulation.effective_iterations(),
            seeded = config.simulation.seed.is_some(),
            preset = config.scoring.effective_preset().name(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskConfig) -> Result<(), ConfigError> {
        config.scoring.effective_thresholds()?;

        let (alpha, beta) = config.simulation.effective_prior();
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.prior_alpha".to_string(),
                message: "must be positive and finite".to_string(),
            });
        }
        if !(beta > 0.0 && beta.is_finite()) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.prior_beta".to_string(),
                message: "must be positive and finite".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut RiskConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut RiskConfig, other: &RiskConfig) {
        // Scoring
        if other.scoring.threshold_preset.is_some() {
            base.scoring.threshold_preset = other.scoring.threshold_preset;
        }
        if other.scoring.critical.is_some() {
            base.scoring.critical = other.scoring.critical;
        }
        if other.scoring.high.is_some() {
            base.scoring.high = other.scoring.high;
        }
        if other.scoring.medium.is_some() {
            base.scoring.medium = other.scoring.medium;
        }

        // Simulation
        if other.simulation.iterations.is_some() {
            base.simulation.iterations = other.simulation.iterations;
        }
        if other.simulation.seed.is_some() {
            base.simulation.seed = other.simulation.seed;
        }
        if other.simulation.parallel.is_some() {
            base.simulation.parallel = other.simulation.parallel;
        }
        if other.simulation.prior_alpha.is_some() {
            base.simulation.prior_alpha = other.simulation.prior_alpha;
        }
        if other.simulation.prior_beta.is_some() {
            base.simulation.prior_beta = other.simulation.prior_beta;
        }

        // Tree
        if other.tree.logic_policy.is_some() {
            base.tree.logic_policy = other.tree.logic_policy;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `THREATRISK_ITERATIONS`, `THREATRISK_SEED`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut RiskConfig) {
        if let Ok(val) = std::env::var("THREATRISK_ITERATIONS") {
            if let Ok(v) = val.parse::<u64>() {
                config.simulation.iterations = Some(v);
            }
        }
        if let Ok(val) = std::env::var("THREATRISK_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.simulation.seed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("THREATRISK_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.simulation.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("THREATRISK_THRESHOLD_PRESET") {
            match val.parse::<ThresholdPreset>() {
                Ok(v) => config.scoring.threshold_preset = Some(v),
                Err(e) => tracing::warn!(error = %e, "ignoring THREATRISK_THRESHOLD_PRESET"),
            }
        }
        if let Ok(val) = std::env::var("THREATRISK_LOGIC_POLICY") {
            match val.parse::<LogicPolicy>() {
                Ok(v) => config.tree.logic_policy = Some(v),
                Err(e) => tracing::warn!(error = %e, "ignoring THREATRISK_LOGIC_POLICY"),
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut RiskConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.iterations {
            config.simulation.iterations = Some(v);
        }
        if let Some(v) = overrides.seed {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = overrides.parallel {
            config.simulation.parallel = Some(v);
        }
        if let Some(v) = overrides.threshold_preset {
            config.scoring.threshold_preset = Some(v);
        }
        if let Some(v) = overrides.logic_policy {
            config.tree.logic_policy = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
