//! # Santa Runtime
//!
//! Wires the assignment engine to configuration, logging and a data store.
//!
//! ## Flow
//!
//! 1. Load configuration from the environment
//! 2. Install the tracing subscriber
//! 3. Load the JSON data set into the in-memory store
//! 4. Run one admin action through `AdminActionHandler`
//! 5. Optionally write the resulting data set back out

pub mod config;
pub mod logging;

pub use config::{Action, RuntimeConfig};
pub use logging::init_logging;

use anyhow::{Context, Result};
use ss_01_assignment_engine::{
    AdminActionHandler, AdminActionResponse, AssignRequest, DataSet, GiftStatusRequest,
    InMemoryAssignmentStore, ReshuffleRequest,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Read a data set from a JSON file.
pub async fn load_dataset(path: &Path) -> Result<DataSet> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse fixture {}", path.display()))
}

/// Write a data set as pretty JSON.
pub async fn save_dataset(path: &Path, data: &DataSet) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize data set")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write state to {}", path.display()))
}

/// Run the configured action against `store`.
pub async fn run_action(config: &RuntimeConfig, store: Arc<InMemoryAssignmentStore>) -> AdminActionResponse {
    let handler = AdminActionHandler::with_config(store, config.assignment.clone());
    let event_id = config.event_id;

    match &config.action {
        Action::Assign => handler.handle_assign(config.requester, AssignRequest { event_id }).await,
        Action::Reshuffle => {
            handler
                .handle_reshuffle(config.requester, ReshuffleRequest { event_id, policy: None })
                .await
        }
        Action::GiftStatus { giver, status } => {
            handler
                .handle_gift_status(
                    config.requester,
                    GiftStatusRequest {
                        event_id,
                        giver: *giver,
                        status: status.clone(),
                    },
                )
                .await
        }
    }
}

/// Load the fixture, run the action and persist the state if requested.
pub async fn run(config: &RuntimeConfig) -> Result<AdminActionResponse> {
    let data = load_dataset(&config.fixture_path).await?;
    info!(
        events = data.events.len(),
        participants = data.participants.len(),
        assignments = data.assignments.len(),
        "Loaded fixture {}",
        config.fixture_path.display()
    );

    let store = Arc::new(InMemoryAssignmentStore::from_dataset(data));
    let response = run_action(config, store.clone()).await;

    if let Some(path) = &config.state_out {
        save_dataset(path, &store.snapshot()).await?;
        info!("State written to {}", path.display());
    }

    Ok(response)
}
