//! Shared constants for the threatrisk engine.

/// threatrisk version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Monte Carlo iteration count.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Standard severity table: Critical lower bound.
pub const STANDARD_CRITICAL_THRESHOLD: f64 = 8.0;

/// Standard severity table: High lower bound.
pub const STANDARD_HIGH_THRESHOLD: f64 = 6.5;

/// Standard severity table: Medium lower bound.
pub const STANDARD_MEDIUM_THRESHOLD: f64 = 5.0;

/// Legacy severity table: Critical lower bound.
pub const LEGACY_CRITICAL_THRESHOLD: f64 = 8.0;

/// Legacy severity table: High lower bound.
pub const LEGACY_HIGH_THRESHOLD: f64 = 6.0;

/// Legacy severity table: Medium lower bound.
pub const LEGACY_MEDIUM_THRESHOLD: f64 = 4.0;

/// Uniform Beta prior: alpha.
pub const DEFAULT_PRIOR_ALPHA: f64 = 1.0;

/// Uniform Beta prior: beta.
pub const DEFAULT_PRIOR_BETA: f64 = 1.0;

/// Credible interval level reported for posterior states.
pub const DEFAULT_CREDIBLE_LEVEL: f64 = 0.95;

/// Number of independent RNG streams used by the parallel Monte Carlo path.
/// Fixed so seeded results do not depend on the thread pool size.
pub const PARALLEL_CHUNKS: u64 = 64;

/// Label used for an attack tree without a `root` field.
pub const DEFAULT_TREE_LABEL: &str = "root";

/// Project config file name.
pub const CONFIG_FILE_NAME: &str = "threatrisk.toml";
