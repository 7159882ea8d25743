//! Value objects for the Assignment Engine
//!
//! Identifiers, lifecycle statuses and the clamped compatibility score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

/// Participant identifier (one per user per event)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

/// User identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant#{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

/// Ordered (giver, receiver) pair
pub type Pair = (ParticipantId, ParticipantId);

/// Participant lifecycle status.
///
/// Only `Active` participants are eligible for pairing. Once a participant
/// leaves `Active` they are never pairable again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    #[default]
    Active,
    Dropped,
    Completed,
}

impl ParticipantStatus {
    pub fn is_eligible(&self) -> bool {
        matches!(self, ParticipantStatus::Active)
    }
}

/// Gift progress for one assignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftStatus {
    #[default]
    Pending,
    Purchased,
    Delivered,
}

impl GiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftStatus::Pending => "pending",
            GiftStatus::Purchased => "purchased",
            GiftStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for GiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(GiftStatus::Pending),
            "purchased" => Ok(GiftStatus::Purchased),
            "delivered" => Ok(GiftStatus::Delivered),
            other => Err(format!("invalid gift status: {other:?}")),
        }
    }
}

/// Event lifecycle status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

/// Role of the user performing an admin action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

/// Compatibility score, always within [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatibilityScore(f64);

impl CompatibilityScore {
    /// Score used when the receiver has no wishlist on file.
    pub const NEUTRAL: CompatibilityScore = CompatibilityScore(0.5);

    /// Clamp a raw score into [0, 1]. NaN maps to the neutral score.
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::NEUTRAL;
        }
        Self(raw.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for CompatibilityScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
