//! Admin Action Payloads
//!
//! Requests carry no identity fields. The requester is passed to the
//! handler separately, as resolved by the caller's session layer.

use crate::config::ReshufflePolicy;
use crate::domain::entities::Pairing;
use crate::domain::value_objects::{EventId, GiftStatus, ParticipantId, UserId, UserRole};
use serde::{Deserialize, Serialize};

// ============================================================
// IDENTITY
// ============================================================

/// Authenticated user performing an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub user_id: UserId,
    #[serde(default)]
    pub role: UserRole,
}

impl Requester {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// Generate the first round for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    pub event_id: EventId,
}

/// Replace the current round of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReshuffleRequest {
    pub event_id: EventId,
    /// Overrides the configured policy for this request
    #[serde(default)]
    pub policy: Option<ReshufflePolicy>,
}

/// Update the gift status of the requester's own assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftStatusRequest {
    pub event_id: EventId,
    pub giver: ParticipantId,
    /// Raw status text: `pending`, `purchased` or `delivered`
    pub status: String,
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// Result of an admin action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminActionResponse {
    /// Whether the action succeeded
    pub success: bool,
    pub event_id: EventId,
    /// Committed round (assign and reshuffle only)
    pub pairs: Vec<Pairing>,
    /// Updated gift status (gift status updates only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_status: Option<GiftStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error message (if failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminActionResponse {
    pub fn committed(event_id: EventId, pairs: Vec<Pairing>, message: &str) -> Self {
        Self {
            success: true,
            event_id,
            pairs,
            gift_status: None,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn gift_status_updated(event_id: EventId, status: GiftStatus) -> Self {
        Self {
            success: true,
            event_id,
            pairs: vec![],
            gift_status: Some(status),
            message: Some(format!("Gift status updated to {status}")),
            error: None,
        }
    }

    pub fn failure(event_id: EventId, error: impl ToString) -> Self {
        Self {
            success: false,
            event_id,
            pairs: vec![],
            gift_status: None,
            message: None,
            error: Some(error.to_string()),
        }
    }
}
