//! Core entities for the Assignment Engine

use super::value_objects::{
    CompatibilityScore, EventId, EventStatus, GiftStatus, Pair, ParticipantId, ParticipantStatus,
    UserId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A participant as seen by the engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub id: ParticipantId,
    pub event_id: EventId,
    pub user_id: UserId,
    #[serde(default)]
    pub status: ParticipantStatus,
}

impl ParticipantRef {
    pub fn new(id: ParticipantId, event_id: EventId, user_id: UserId) -> Self {
        Self {
            id,
            event_id,
            user_id,
            status: ParticipantStatus::Active,
        }
    }

    pub fn with_status(mut self, status: ParticipantStatus) -> Self {
        self.status = status;
        self
    }
}

/// Gift preferences of one user for one event. All fields are free-form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wishlist {
    pub user_id: UserId,
    pub event_id: EventId,
    pub preferences: Option<String>,
    pub dislikes: Option<String>,
    pub gift_category: Option<String>,
    pub clothing_size: Option<String>,
    pub color_preference: Option<String>,
    /// Comma-separated hobby tags, e.g. `"chess, Hiking,board games"`
    pub hobby_tags: Option<String>,
    pub notes: Option<String>,
}

impl Wishlist {
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self {
            user_id,
            event_id,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.gift_category = Some(category.to_string());
        self
    }

    pub fn with_hobby_tags(mut self, tags: &str) -> Self {
        self.hobby_tags = Some(tags.to_string());
        self
    }

    /// Normalized (trimmed, lowercase) gift category, if any
    pub fn category(&self) -> Option<String> {
        self.gift_category
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
    }

    /// Normalized hobby tag set
    pub fn tags(&self) -> BTreeSet<String> {
        self.hobby_tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Gift exchange event (only the fields the admin workflow needs)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub admin_id: UserId,
    #[serde(default)]
    pub status: EventStatus,
    /// Set once a round has been committed; gates re-running without reshuffle
    #[serde(default)]
    pub assignment_done: bool,
}

impl Event {
    pub fn new(id: EventId, admin_id: UserId) -> Self {
        Self {
            id,
            admin_id,
            status: EventStatus::Pending,
            assignment_done: false,
        }
    }
}

/// Candidate giver -> receiver mapping produced by the generator.
///
/// Pairs are kept in participant order. Not guaranteed valid until it has
/// passed the validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateMapping {
    pub pairs: Vec<Pair>,
}

impl CandidateMapping {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    pub fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.pairs
            .iter()
            .find(|(g, _)| *g == giver)
            .map(|(_, r)| *r)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// One resolved, scored pairing in a computed round
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
    pub compatibility_score: CompatibilityScore,
}

/// A complete, valid round ready for the caller to persist
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    pub event_id: EventId,
    pub pairs: Vec<Pairing>,
    /// Attempt on which the valid candidate was found (1-based)
    pub attempts: usize,
}

impl AssignmentPlan {
    pub fn receiver_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.pairs
            .iter()
            .find(|p| p.giver == giver)
            .map(|p| p.receiver)
    }

    /// (giver, receiver) pairs, e.g. to use as history for a later reshuffle
    pub fn as_pairs(&self) -> Vec<Pair> {
        self.pairs.iter().map(|p| (p.giver, p.receiver)).collect()
    }
}

/// Persisted assignment row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub event_id: EventId,
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
    pub compatibility_score: CompatibilityScore,
    #[serde(default)]
    pub gift_status: GiftStatus,
}

impl Assignment {
    pub fn from_pairing(event_id: EventId, pairing: &Pairing) -> Self {
        Self {
            event_id,
            giver: pairing.giver,
            receiver: pairing.receiver,
            compatibility_score: pairing.compatibility_score,
            gift_status: GiftStatus::Pending,
        }
    }
}
