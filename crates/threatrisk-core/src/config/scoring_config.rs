//! DREAD scoring configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{SeverityThresholds, ThresholdPreset};

/// Configuration for severity classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base threshold table. Default: standard (8 / 6.5 / 5).
    pub threshold_preset: Option<ThresholdPreset>,
    /// Override for the Critical lower bound.
    pub critical: Option<f64>,
    /// Override for the High lower bound.
    pub high: Option<f64>,
    /// Override for the Medium lower bound.
    pub medium: Option<f64>,
}

impl ScoringConfig {
    /// Returns the effective preset, defaulting to standard.
    pub fn effective_preset(&self) -> ThresholdPreset {
        self.threshold_preset.unwrap_or_default()
    }

    /// The preset table with any per-tier overrides applied, validated.
    pub fn effective_thresholds(&self) -> Result<SeverityThresholds, ConfigError> {
        let base = self.effective_preset().thresholds();
        SeverityThresholds::new(
            self.critical.unwrap_or(base.critical),
            self.high.unwrap_or(base.high),
            self.medium.unwrap_or(base.medium),
        )
    }
}
