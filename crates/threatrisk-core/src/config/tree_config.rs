//! Attack tree evaluation configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How the evaluator treats a gate whose logic is neither AND nor OR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicPolicy {
    /// Treat it as OR and log a warning.
    #[default]
    Lenient,
    /// Fail the evaluation with `TreeError::UnrecognizedLogic`.
    Strict,
}

impl FromStr for LogicPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidValue {
                field: "tree.logic_policy".to_string(),
                message: format!("unknown policy '{other}' (expected lenient or strict)"),
            }),
        }
    }
}

/// Configuration for attack tree evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Unrecognized-logic policy. Default: lenient.
    pub logic_policy: Option<LogicPolicy>,
}

impl TreeConfig {
    /// Returns the effective policy, defaulting to lenient.
    pub fn effective_logic_policy(&self) -> LogicPolicy {
        self.logic_policy.unwrap_or_default()
    }
}
