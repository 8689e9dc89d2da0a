//! logging
//!
//! Diagnostic logging through `tracing`.
//!
//! Command output is written to the console streams directly; tracing events
//! are diagnostics only. They go to standard error, filtered by `DRYDOCK_LOG`
//! (any `EnvFilter` directive, e.g. `debug` or `drydock::controller=trace`),
//! and default to `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DRYDOCK_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. Calling this twice is harmless.
pub fn init_logging() {
    let filter = build_env_filter();

    let _ = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
