//! # Admin Workflow Tests (ss-01)
//!
//! Drives `AdminActionHandler` over the in-memory store through the event
//! lifecycle: assign, gift progress, reshuffle, participant drop-out.

use ss_01_assignment_engine::{
    AdminActionHandler, AssignRequest, AssignmentConfig, AssignmentDataStore, CompatibilityScore,
    Event, EventId, EventStatus, GiftStatus, GiftStatusRequest, InMemoryAssignmentStore, Pair,
    ParticipantId, ParticipantRef, ParticipantStatus, Requester, ReshufflePolicy, ReshuffleRequest,
    ScoringStrategy, UserId, UserRole, Wishlist, EXHAUSTED_REASON,
};
use std::collections::HashSet;
use std::sync::Arc;

// =============================================================================
// TEST HELPERS
// =============================================================================

const EVENT: EventId = EventId(10);
const ADMIN: UserId = UserId(500);

fn admin() -> Requester {
    Requester::new(ADMIN, UserRole::Admin)
}

fn user_of(participant: u64) -> UserId {
    UserId(1000 + participant)
}

fn make_store(n: u64) -> Arc<InMemoryAssignmentStore> {
    let store = InMemoryAssignmentStore::new();
    store.insert_event(Event::new(EVENT, ADMIN));
    for id in 1..=n {
        store.insert_participant(ParticipantRef::new(ParticipantId(id), EVENT, user_of(id)));
    }
    Arc::new(store)
}

fn make_handler(store: &Arc<InMemoryAssignmentStore>, config: AssignmentConfig) -> AdminActionHandler<InMemoryAssignmentStore> {
    AdminActionHandler::with_config(store.clone(), config)
}

fn seeded(seed: u64) -> AssignmentConfig {
    AssignmentConfig {
        rng_seed: Some(seed),
        ..Default::default()
    }
}

async fn current_round(store: &InMemoryAssignmentStore) -> HashSet<Pair> {
    store.list_existing_pairs(EVENT).await.unwrap()
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[tokio::test]
async fn test_full_event_lifecycle() {
    let store = make_store(6);
    let handler = make_handler(&store, seeded(31));

    let assigned = handler.handle_assign(admin(), AssignRequest { event_id: EVENT }).await;
    assert!(assigned.success, "{:?}", assigned.error);
    assert_eq!(store.event(EVENT).unwrap().status, EventStatus::Active);

    // Giver of participant 1 buys the gift
    let updated = handler
        .handle_gift_status(
            Requester::new(user_of(1), UserRole::User),
            GiftStatusRequest {
                event_id: EVENT,
                giver: ParticipantId(1),
                status: "purchased".into(),
            },
        )
        .await;
    assert!(updated.success, "{:?}", updated.error);

    let first = current_round(&store).await;
    let reshuffled = handler
        .handle_reshuffle(admin(), ReshuffleRequest { event_id: EVENT, policy: None })
        .await;
    assert!(reshuffled.success, "{:?}", reshuffled.error);

    let second = current_round(&store).await;
    assert_eq!(second.len(), 6);
    assert!(first.is_disjoint(&second));

    // New round starts over
    assert!(store
        .assignments_for(EVENT)
        .iter()
        .all(|a| a.gift_status == GiftStatus::Pending));
}

#[tokio::test]
async fn test_dropped_participant_left_out_of_reshuffle() {
    let store = make_store(5);
    let handler = make_handler(&store, seeded(8));

    handler.handle_assign(admin(), AssignRequest { event_id: EVENT }).await;
    store.insert_participant(
        ParticipantRef::new(ParticipantId(5), EVENT, user_of(5)).with_status(ParticipantStatus::Dropped),
    );

    let response = handler
        .handle_reshuffle(
            admin(),
            ReshuffleRequest {
                event_id: EVENT,
                policy: Some(ReshufflePolicy::Unconstrained),
            },
        )
        .await;

    assert!(response.success, "{:?}", response.error);
    assert_eq!(response.pairs.len(), 4);
    assert!(response
        .pairs
        .iter()
        .all(|p| p.giver != ParticipantId(5) && p.receiver != ParticipantId(5)));
    assert_eq!(store.assignments_for(EVENT).len(), 4);
}

#[tokio::test]
async fn test_repeated_reshuffles_eventually_exhaust_pairs() {
    // Three participants have exactly two derangements
    let store = make_store(3);
    let handler = make_handler(&store, seeded(2));

    handler.handle_assign(admin(), AssignRequest { event_id: EVENT }).await;
    let first = current_round(&store).await;

    let second = handler
        .handle_reshuffle(admin(), ReshuffleRequest { event_id: EVENT, policy: None })
        .await;
    assert!(second.success);

    // Only the previous round counts as history, so the first round is back
    let third = handler
        .handle_reshuffle(admin(), ReshuffleRequest { event_id: EVENT, policy: None })
        .await;
    assert!(third.success);
    assert_eq!(current_round(&store).await, first);
}

#[tokio::test]
async fn test_exhausted_reshuffle_reports_reason() {
    let store = make_store(2);
    let handler = make_handler(
        &store,
        AssignmentConfig {
            max_attempts: 10,
            rng_seed: Some(3),
            ..Default::default()
        },
    );

    handler.handle_assign(admin(), AssignRequest { event_id: EVENT }).await;
    let before = store.assignments_for(EVENT);

    let response = handler
        .handle_reshuffle(admin(), ReshuffleRequest { event_id: EVENT, policy: None })
        .await;

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some(format!("{EXHAUSTED_REASON} (10 attempts)").as_str())
    );
    assert_eq!(store.assignments_for(EVENT), before);
}

// =============================================================================
// SCORING
// =============================================================================

#[tokio::test]
async fn test_overlap_scoring_through_handler() {
    let store = make_store(2);
    store.insert_wishlist(
        Wishlist::new(user_of(1), EVENT)
            .with_category("Books")
            .with_hobby_tags("chess,hiking"),
    );
    store.insert_wishlist(
        Wishlist::new(user_of(2), EVENT)
            .with_category("books")
            .with_hobby_tags("Chess"),
    );

    let handler = make_handler(
        &store,
        AssignmentConfig {
            scoring: ScoringStrategy::PreferenceOverlap,
            rng_seed: Some(1),
            ..Default::default()
        },
    );

    let response = handler.handle_assign(admin(), AssignRequest { event_id: EVENT }).await;
    assert!(response.success);
    for pairing in &response.pairs {
        // 0.5 base + 0.25 category + 0.05 for "chess"
        assert!((pairing.compatibility_score.value() - 0.8).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_receiver_without_wishlist_scores_neutral() {
    let store = make_store(2);
    store.insert_wishlist(Wishlist::new(user_of(1), EVENT).with_category("books"));

    let handler = make_handler(
        &store,
        AssignmentConfig {
            scoring: ScoringStrategy::PreferenceOverlap,
            rng_seed: Some(1),
            ..Default::default()
        },
    );

    let response = handler.handle_assign(admin(), AssignRequest { event_id: EVENT }).await;
    let to_two = response
        .pairs
        .iter()
        .find(|p| p.receiver == ParticipantId(2))
        .unwrap();
    assert_eq!(to_two.compatibility_score, CompatibilityScore::NEUTRAL);
}
