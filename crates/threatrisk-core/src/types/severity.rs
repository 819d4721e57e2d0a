//! Severity tiers and the threshold tables that map DREAD scores to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    LEGACY_CRITICAL_THRESHOLD, LEGACY_HIGH_THRESHOLD, LEGACY_MEDIUM_THRESHOLD,
    STANDARD_CRITICAL_THRESHOLD, STANDARD_HIGH_THRESHOLD, STANDARD_MEDIUM_THRESHOLD,
};
use crate::errors::ConfigError;

/// Severity tier derived from a DREAD score. Ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: &'static [Severity] = &[
        Severity::None,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named threshold tables.
///
/// Two tables have been used by different generations of DREAD tooling.
/// `Standard` (8 / 6.5 / 5) is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPreset {
    #[default]
    Standard,
    Legacy,
}

impl ThresholdPreset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
        }
    }

    pub fn thresholds(&self) -> SeverityThresholds {
        match self {
            Self::Standard => SeverityThresholds::standard(),
            Self::Legacy => SeverityThresholds::legacy(),
        }
    }
}

impl FromStr for ThresholdPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "legacy" => Ok(Self::Legacy),
            other => Err(ConfigError::InvalidValue {
                field: "scoring.threshold_preset".to_string(),
                message: format!("unknown preset '{other}' (expected standard or legacy)"),
            }),
        }
    }
}

/// Inclusive lower bounds for the Medium, High and Critical tiers.
///
/// Any positive score below `medium` is Low; zero or negative is None.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl SeverityThresholds {
    /// Build a custom table. Requires `0 < medium <= high <= critical`.
    pub fn new(critical: f64, high: f64, medium: f64) -> Result<Self, ConfigError> {
        let thresholds = Self {
            critical,
            high,
            medium,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// 8 / 6.5 / 5.
    pub fn standard() -> Self {
        Self {
            critical: STANDARD_CRITICAL_THRESHOLD,
            high: STANDARD_HIGH_THRESHOLD,
            medium: STANDARD_MEDIUM_THRESHOLD,
        }
    }

    /// 8 / 6 / 4.
    pub fn legacy() -> Self {
        Self {
            critical: LEGACY_CRITICAL_THRESHOLD,
            high: LEGACY_HIGH_THRESHOLD,
            medium: LEGACY_MEDIUM_THRESHOLD,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let all_finite =
            self.critical.is_finite() && self.high.is_finite() && self.medium.is_finite();
        if !all_finite || self.medium <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "scoring".to_string(),
                message: "thresholds must be finite and positive".to_string(),
            });
        }
        if self.medium > self.high || self.high > self.critical {
            return Err(ConfigError::ValidationFailed {
                field: "scoring".to_string(),
                message: format!(
                    "thresholds must satisfy medium <= high <= critical (got {} / {} / {})",
                    self.medium, self.high, self.critical
                ),
            });
        }
        Ok(())
    }

    /// Classify a score. Highest matching tier wins.
    pub fn classify(&self, score: f64) -> Severity {
        if score >= self.critical {
            Severity::Critical
        } else if score >= self.high {
            Severity::High
        } else if score >= self.medium {
            Severity::Medium
        } else if score > 0.0 {
            Severity::Low
        } else {
            Severity::None
        }
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_boundaries() {
        let t = SeverityThresholds::standard();
        assert_eq!(t.classify(8.0), Severity::Critical);
        assert_eq!(t.classify(7.99), Severity::High);
        assert_eq!(t.classify(6.5), Severity::High);
        assert_eq!(t.classify(6.49), Severity::Medium);
        assert_eq!(t.classify(5.0), Severity::Medium);
        assert_eq!(t.classify(4.99), Severity::Low);
        assert_eq!(t.classify(0.01), Severity::Low);
        assert_eq!(t.classify(0.0), Severity::None);
    }

    #[test]
    fn test_legacy_boundaries() {
        let t = SeverityThresholds::legacy();
        assert_eq!(t.classify(6.0), Severity::High);
        assert_eq!(t.classify(5.99), Severity::Medium);
        assert_eq!(t.classify(4.0), Severity::Medium);
        assert_eq!(t.classify(3.99), Severity::Low);
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        assert!(SeverityThresholds::new(5.0, 6.0, 4.0).is_err());
        assert!(SeverityThresholds::new(8.0, 6.0, 0.0).is_err());
        assert!(SeverityThresholds::new(8.0, 8.0, 8.0).is_ok());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Critical.to_string(), "Critical");
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("Legacy".parse::<ThresholdPreset>().unwrap(), ThresholdPreset::Legacy);
        assert!("strict".parse::<ThresholdPreset>().is_err());
    }
}
