//! Logging setup.
//!
//! Logs go to stderr; stdout carries only the response payload.

use crate::config::RuntimeConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` directives win over `SS_LOG_LEVEL` when both parse.
pub fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow!("invalid log filter {:?}: {}", config.log_level, e))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = if config.json_logs {
        builder
            .json()
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
