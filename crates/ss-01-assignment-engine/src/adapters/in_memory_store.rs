//! In-Memory Data Store Adapter
//!
//! Implements `AssignmentDataStore` and `AssignmentRepository` over
//! lock-protected maps. Used by tests and by the runtime's fixture mode.

use crate::domain::entities::{Assignment, AssignmentPlan, Event, ParticipantRef, Wishlist};
use crate::domain::errors::DataStoreError;
use crate::domain::value_objects::{EventId, EventStatus, GiftStatus, Pair, ParticipantId, UserId};
use crate::ports::outbound::{AssignmentDataStore, AssignmentRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Serializable contents of a store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSet {
    pub events: Vec<Event>,
    pub participants: Vec<ParticipantRef>,
    pub wishlists: Vec<Wishlist>,
    pub assignments: Vec<Assignment>,
}

#[derive(Default)]
struct Tables {
    events: HashMap<EventId, Event>,
    /// Ordered by id so listings are stable
    participants: BTreeMap<ParticipantId, ParticipantRef>,
    wishlists: HashMap<(UserId, EventId), Wishlist>,
    /// Current round, keyed by giver (unique per event)
    assignments: BTreeMap<ParticipantId, Assignment>,
}

/// In-memory store for events, participants, wishlists and assignments.
#[derive(Default)]
pub struct InMemoryAssignmentStore {
    tables: RwLock<Tables>,
}

impl InMemoryAssignmentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a data set.
    pub fn from_dataset(data: DataSet) -> Self {
        let store = Self::new();
        for event in data.events {
            store.insert_event(event);
        }
        for participant in data.participants {
            store.insert_participant(participant);
        }
        for wishlist in data.wishlists {
            store.insert_wishlist(wishlist);
        }
        for assignment in data.assignments {
            store.insert_assignment(assignment);
        }
        store
    }

    pub fn insert_event(&self, event: Event) {
        self.tables.write().events.insert(event.id, event);
    }

    pub fn insert_participant(&self, participant: ParticipantRef) {
        self.tables.write().participants.insert(participant.id, participant);
    }

    pub fn insert_wishlist(&self, wishlist: Wishlist) {
        self.tables
            .write()
            .wishlists
            .insert((wishlist.user_id, wishlist.event_id), wishlist);
    }

    pub fn insert_assignment(&self, assignment: Assignment) {
        self.tables.write().assignments.insert(assignment.giver, assignment);
    }

    /// Current round of an event, ordered by giver.
    pub fn assignments_for(&self, event_id: EventId) -> Vec<Assignment> {
        self.tables
            .read()
            .assignments
            .values()
            .filter(|a| a.event_id == event_id)
            .cloned()
            .collect()
    }

    pub fn event(&self, event_id: EventId) -> Option<Event> {
        self.tables.read().events.get(&event_id).cloned()
    }

    /// Copy the full store contents out, ordered by key.
    pub fn snapshot(&self) -> DataSet {
        let tables = self.tables.read();

        let mut events: Vec<Event> = tables.events.values().cloned().collect();
        events.sort_by_key(|e| e.id);
        let mut wishlists: Vec<Wishlist> = tables.wishlists.values().cloned().collect();
        wishlists.sort_by_key(|w| (w.event_id, w.user_id));

        DataSet {
            events,
            participants: tables.participants.values().cloned().collect(),
            wishlists,
            assignments: tables.assignments.values().cloned().collect(),
        }
    }
}

#[async_trait]
impl AssignmentDataStore for InMemoryAssignmentStore {
    async fn list_active_participants(&self, event_id: EventId) -> Result<Vec<ParticipantRef>, DataStoreError> {
        let tables = self.tables.read();
        Ok(tables
            .participants
            .values()
            .filter(|p| p.event_id == event_id && p.status.is_eligible())
            .cloned()
            .collect())
    }

    async fn list_existing_pairs(&self, event_id: EventId) -> Result<HashSet<Pair>, DataStoreError> {
        let tables = self.tables.read();
        Ok(tables
            .assignments
            .values()
            .filter(|a| a.event_id == event_id)
            .map(|a| (a.giver, a.receiver))
            .collect())
    }

    async fn get_wishlist(&self, user_id: UserId, event_id: EventId) -> Result<Option<Wishlist>, DataStoreError> {
        Ok(self.tables.read().wishlists.get(&(user_id, event_id)).cloned())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentStore {
    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>, DataStoreError> {
        Ok(self.event(event_id))
    }

    async fn get_participant(&self, participant_id: ParticipantId) -> Result<Option<ParticipantRef>, DataStoreError> {
        Ok(self.tables.read().participants.get(&participant_id).cloned())
    }

    async fn commit_round(&self, plan: &AssignmentPlan) -> Result<(), DataStoreError> {
        let mut tables = self.tables.write();

        let event = tables
            .events
            .get_mut(&plan.event_id)
            .ok_or(DataStoreError::EventNotFound(plan.event_id))?;
        event.assignment_done = true;
        event.status = EventStatus::Active;

        tables.assignments.retain(|_, a| a.event_id != plan.event_id);
        for pairing in &plan.pairs {
            tables
                .assignments
                .insert(pairing.giver, Assignment::from_pairing(plan.event_id, pairing));
        }

        debug!(
            "[ss-01] Committed {} assignments for {}",
            plan.pairs.len(),
            plan.event_id
        );
        Ok(())
    }

    async fn get_assignment(&self, giver: ParticipantId) -> Result<Option<Assignment>, DataStoreError> {
        Ok(self.tables.read().assignments.get(&giver).cloned())
    }

    async fn set_gift_status(&self, giver: ParticipantId, status: GiftStatus) -> Result<Assignment, DataStoreError> {
        let mut tables = self.tables.write();
        let assignment = tables
            .assignments
            .get_mut(&giver)
            .ok_or(DataStoreError::ParticipantNotFound(giver))?;
        assignment.gift_status = status;
        Ok(assignment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Pairing;
    use crate::domain::value_objects::{CompatibilityScore, ParticipantStatus};

    fn seeded_store() -> InMemoryAssignmentStore {
        let store = InMemoryAssignmentStore::new();
        store.insert_event(Event::new(EventId(1), UserId(1)));
        for id in [3u64, 1, 2] {
            store.insert_participant(ParticipantRef::new(ParticipantId(id), EventId(1), UserId(10 + id)));
        }
        store.insert_participant(
            ParticipantRef::new(ParticipantId(4), EventId(1), UserId(14)).with_status(ParticipantStatus::Dropped),
        );
        store.insert_participant(ParticipantRef::new(ParticipantId(5), EventId(2), UserId(15)));
        store
    }

    fn plan(event: u64, pairs: &[(u64, u64)]) -> AssignmentPlan {
        AssignmentPlan {
            event_id: EventId(event),
            pairs: pairs
                .iter()
                .map(|&(g, r)| Pairing {
                    giver: ParticipantId(g),
                    receiver: ParticipantId(r),
                    compatibility_score: CompatibilityScore::NEUTRAL,
                })
                .collect(),
            attempts: 1,
        }
    }

    #[tokio::test]
    async fn test_active_participants_ordered_and_filtered() {
        let store = seeded_store();
        let ids: Vec<_> = store
            .list_active_participants(EventId(1))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_commit_round_replaces_and_marks_event() {
        let store = seeded_store();
        store.commit_round(&plan(1, &[(1, 2), (2, 3), (3, 1)])).await.unwrap();
        store.commit_round(&plan(1, &[(1, 3), (3, 2), (2, 1)])).await.unwrap();

        let pairs = store.list_existing_pairs(EventId(1)).await.unwrap();
        let expected: HashSet<Pair> = [
            (ParticipantId(1), ParticipantId(3)),
            (ParticipantId(3), ParticipantId(2)),
            (ParticipantId(2), ParticipantId(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(pairs, expected);

        let event = store.event(EventId(1)).unwrap();
        assert!(event.assignment_done);
        assert_eq!(event.status, EventStatus::Active);
    }

    #[tokio::test]
    async fn test_commit_round_unknown_event() {
        let store = seeded_store();
        let result = store.commit_round(&plan(42, &[(1, 2), (2, 1)])).await;
        assert!(matches!(result, Err(DataStoreError::EventNotFound(EventId(42)))));
    }

    #[tokio::test]
    async fn test_set_gift_status() {
        let store = seeded_store();
        store.commit_round(&plan(1, &[(1, 2), (2, 3), (3, 1)])).await.unwrap();

        let updated = store.set_gift_status(ParticipantId(2), GiftStatus::Purchased).await.unwrap();
        assert_eq!(updated.gift_status, GiftStatus::Purchased);
        assert_eq!(store.assignments_for(EventId(1)).len(), 3);
    }

    #[test]
    fn test_dataset_round_trip_from_json() {
        let json = r#"{
            "events": [{"id": 1, "admin_id": 7}],
            "participants": [
                {"id": 1, "event_id": 1, "user_id": 7},
                {"id": 2, "event_id": 1, "user_id": 8, "status": "dropped"}
            ],
            "wishlists": [{"user_id": 7, "event_id": 1, "gift_category": "books"}]
        }"#;
        let data: DataSet = serde_json::from_str(json).unwrap();
        let store = InMemoryAssignmentStore::from_dataset(data);

        assert!(store.event(EventId(1)).is_some());
        assert!(store.assignments_for(EventId(1)).is_empty());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.wishlists[0].category().as_deref(), Some("books"));
    }
}
