//! Diagnostic logging setup.
//!
//! Log records go to stderr so that command output on stdout stays
//! machine-readable. The filter is taken from `REGCONF_LOG`
//! (e.g. `REGCONF_LOG=debug`) and defaults to `warn`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "REGCONF_LOG";

/// Builds the log filter from [`LOG_ENV_VAR`], falling back to `warn`.
///
/// Invalid directives are ignored rather than failing the command.
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy()
}

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(env_filter())
        .init();
}
