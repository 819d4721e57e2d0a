//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "THREATRISK_LOG";

/// Filter used when `THREATRISK_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "threatrisk=info";

/// Initialize the threatrisk tracing/logging system.
///
/// Reads `THREATRISK_LOG` for per-module log levels, e.g.
/// `THREATRISK_LOG=threatrisk_analysis::aggregate=debug,threatrisk_core=warn`.
/// Falls back to `threatrisk=info` if the variable is not set or is invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A subscriber installed by the host application wins.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
