//! Logging setup
//!
//! Logs go to stderr so stdout carries only calculator output. `RUST_LOG`
//! takes precedence over the `-v` level. Escape codes in log lines follow
//! `--color`.

use crate::config::{ColorChoice, Verbosity};
use crate::error::{CliError, CliResult};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter for a verbosity level alone
#[must_use]
pub fn default_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::new(verbosity.log_directive())
}

/// Builds the filter: `RUST_LOG` when set and valid, else the verbosity default
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity))
}

/// Installs the global subscriber
pub fn init(verbosity: Verbosity, json: bool, color: ColorChoice) -> CliResult<()> {
    let filter = env_filter(verbosity);
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(color.should_color_stderr())
                    .with_target(false)
                    .compact(),
            )
            .try_init()
    };
    result.map_err(|e| CliError::config(format!("cannot install logger: {e}")))
}
