//! # Santa Runtime
//!
//! Runs one admin action against a JSON data set and prints the response.
//! Exits with status 1 when the action was refused or failed.

use anyhow::{Context, Result};
use santa_runtime::{init_logging, run, RuntimeConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    init_logging(&config)?;

    info!(
        action = ?config.action,
        event_id = config.event_id.0,
        requester = config.requester.user_id.0,
        "Santa runtime v{}",
        env!("CARGO_PKG_VERSION")
    );

    let response = run(&config).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to serialize response")?
    );

    if !response.success {
        warn!("Action did not succeed");
        std::process::exit(1);
    }

    Ok(())
}
