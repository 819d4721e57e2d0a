//! Data model shared by every threatrisk subsystem.

pub mod attack_tree;
pub mod severity;
pub mod threat;
pub mod threat_index;

pub use attack_tree::{parse_tree, AttackTree, AttackTreeNode, GateLogic};
pub use severity::{Severity, SeverityThresholds, ThresholdPreset};
pub use threat::{parse_catalog, DreadRatings, Threat, DREAD_KEYS};
pub use threat_index::ThreatIndex;
