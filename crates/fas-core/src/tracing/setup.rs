//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{defaults, ObservabilityConfig};

static INIT: Once = Once::new();

/// Initialize logging for the search crates.
///
/// Reads the `FAS_LOG` environment variable for filter directives.
/// Format: `FAS_LOG=fas_search=debug,fas_core=info`
///
/// Falls back to `fas=info` if `FAS_LOG` is not set or is invalid.
///
/// Idempotent: only the first call in a process installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(defaults::LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_FILTER));

        // A subscriber installed elsewhere (e.g. by the host application) wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Initialize logging from the `[observability]` config section.
///
/// `FAS_LOG` still takes precedence over `log_level` when set.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(defaults::LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let result = if config.json {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).json())
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(filter)
                .try_init()
        };

        if result.is_ok() {
            ::tracing::debug!(level = %config.log_level, json = config.json, "tracing initialized");
        }
    });
}
