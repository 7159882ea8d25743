//! Runtime configuration from environment variables.

use anyhow::{anyhow, bail, Context, Result};
use ss_01_assignment_engine::{AssignmentConfig, EventId, ParticipantId, Requester, UserId, UserRole};
use std::path::PathBuf;
use std::str::FromStr;

/// Admin action to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Assign,
    Reshuffle,
    /// Set the gift status of `giver` to the raw status text
    GiftStatus { giver: ParticipantId, status: String },
}

impl FromStr for Action {
    type Err = anyhow::Error;

    /// Parses `assign` and `reshuffle`. Gift status updates are built by
    /// [`RuntimeConfig::from_lookup`] since they need extra variables.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "assign" => Ok(Action::Assign),
            "reshuffle" => Ok(Action::Reshuffle),
            other => Err(anyhow!("unknown action {other:?} (expected assign, reshuffle or gift-status)")),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// JSON data set loaded into the store
    pub fixture_path: PathBuf,
    /// Where to write the store contents after the action, if anywhere
    pub state_out: Option<PathBuf>,
    pub action: Action,
    pub event_id: EventId,
    pub requester: Requester,
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
    pub json_logs: bool,
    pub assignment: AssignmentConfig,
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SS_FIXTURE_PATH`: data set to load (required)
    /// - `SS_STATE_OUT`: write the resulting data set here (optional)
    /// - `SS_ACTION`: `assign` | `reshuffle` | `gift-status` (default: assign)
    /// - `SS_EVENT_ID`: target event (required)
    /// - `SS_REQUESTER_ID`: acting user (required)
    /// - `SS_REQUESTER_ROLE`: `user` | `admin` | `super_admin` (default: admin)
    /// - `SS_GIVER_ID`, `SS_GIFT_STATUS`: required for `gift-status`
    /// - `SS_LOG_LEVEL` or `RUST_LOG`: log level (default: info)
    /// - `SS_JSON_LOGS`: JSON formatted logs (default: false)
    /// - Engine knobs, see [`AssignmentConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fixture_path = lookup("SS_FIXTURE_PATH")
            .map(PathBuf::from)
            .context("SS_FIXTURE_PATH is required")?;
        let state_out = lookup("SS_STATE_OUT").map(PathBuf::from);

        let action = match lookup("SS_ACTION").as_deref().map(str::trim) {
            None | Some("") => Action::Assign,
            Some("gift-status") => Action::GiftStatus {
                giver: ParticipantId(required_u64(&lookup, "SS_GIVER_ID")?),
                status: lookup("SS_GIFT_STATUS").context("SS_GIFT_STATUS is required for gift-status")?,
            },
            Some(other) => other.parse()?,
        };

        let event_id = EventId(required_u64(&lookup, "SS_EVENT_ID")?);
        let role = match lookup("SS_REQUESTER_ROLE") {
            Some(v) => parse_role(&v)?,
            None => UserRole::Admin,
        };
        let requester = Requester::new(UserId(required_u64(&lookup, "SS_REQUESTER_ID")?), role);

        let log_level = lookup("SS_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let json_logs = lookup("SS_JSON_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let assignment = AssignmentConfig::from_lookup(&lookup)?;

        Ok(Self {
            fixture_path,
            state_out,
            action,
            event_id,
            requester,
            log_level,
            json_logs,
            assignment,
        })
    }
}

fn required_u64<F>(lookup: &F, key: &str) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).with_context(|| format!("{key} is required"))?;
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be an unsigned integer, got {value:?}"))
}

fn parse_role(value: &str) -> Result<UserRole> {
    match value.trim().to_lowercase().as_str() {
        "user" => Ok(UserRole::User),
        "admin" => Ok(UserRole::Admin),
        "super_admin" | "super-admin" => Ok(UserRole::SuperAdmin),
        other => bail!("unknown role {other:?}"),
    }
}
