//! Outbound Ports (Driven Ports / SPI)
//!
//! The engine reads through `AssignmentDataStore`. The admin workflow also
//! writes through `AssignmentRepository`. Scoring is pluggable through
//! `CompatibilityScorer`.

use crate::domain::entities::{Assignment, AssignmentPlan, Event, ParticipantRef, Wishlist};
use crate::domain::errors::DataStoreError;
use crate::domain::value_objects::{CompatibilityScore, EventId, GiftStatus, Pair, ParticipantId, UserId};
use async_trait::async_trait;
use std::collections::HashSet;

/// Read access to participants, pairing history and wishlists.
#[async_trait]
pub trait AssignmentDataStore: Send + Sync {
    /// Active participants of the event, in a stable order.
    async fn list_active_participants(&self, event_id: EventId) -> Result<Vec<ParticipantRef>, DataStoreError>;

    /// Pairs from prior, non-superseded rounds for the event.
    async fn list_existing_pairs(&self, event_id: EventId) -> Result<HashSet<Pair>, DataStoreError>;

    /// Wishlist of a user for the event, if one is on file.
    async fn get_wishlist(&self, user_id: UserId, event_id: EventId) -> Result<Option<Wishlist>, DataStoreError>;
}

/// Write-side persistence used by the admin workflow.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>, DataStoreError>;

    async fn get_participant(&self, participant_id: ParticipantId) -> Result<Option<ParticipantRef>, DataStoreError>;

    /// Atomically replace the event's current round with `plan` and mark
    /// the event as assigned.
    async fn commit_round(&self, plan: &AssignmentPlan) -> Result<(), DataStoreError>;

    /// Current assignment of a giver, if any.
    async fn get_assignment(&self, giver: ParticipantId) -> Result<Option<Assignment>, DataStoreError>;

    async fn set_gift_status(&self, giver: ParticipantId, status: GiftStatus) -> Result<Assignment, DataStoreError>;
}

/// Gift-suitability heuristic for a resolved pair.
///
/// Implementations must return the neutral score when the receiver has no
/// wishlist. `CompatibilityScore` clamps to [0, 1].
pub trait CompatibilityScorer: Send + Sync {
    fn score(&self, giver_wishlist: Option<&Wishlist>, receiver_wishlist: Option<&Wishlist>) -> CompatibilityScore;
}
