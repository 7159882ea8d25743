//! Assignment Service
//!
//! Main service implementing AssignmentEngineApi. All data store reads
//! happen up front; `compute_assignments` then runs without I/O.

use crate::algorithms::{generate_candidate, scorer_from_config, validate_candidate, Verdict};
use crate::config::AssignmentConfig;
use crate::domain::entities::{AssignmentPlan, Pairing, ParticipantRef, Wishlist};
use crate::domain::errors::AssignmentError;
use crate::domain::value_objects::{EventId, Pair, ParticipantId};
use crate::ports::inbound::AssignmentEngineApi;
use crate::ports::outbound::{AssignmentDataStore, CompatibilityScorer};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

/// Minimum number of active participants for a round
pub const MIN_PARTICIPANTS: usize = 2;

/// Everything a round is computed from
pub struct RoundInput<'a> {
    pub event_id: EventId,
    pub participants: &'a [ParticipantRef],
    pub existing_pairs: &'a HashSet<Pair>,
    /// Wishlists keyed by participant id; missing entries mean no wishlist
    pub wishlists: &'a HashMap<ParticipantId, Wishlist>,
}

/// Compute a valid round by rejection sampling.
///
/// Only participants whose status is eligible take part. Each attempt
/// shuffles a candidate and validates it. The first valid candidate is
/// scored pair by pair and returned. After `max_attempts` invalid
/// candidates the round is `AssignmentExhausted`.
pub fn compute_assignments<R: Rng + ?Sized>(
    input: &RoundInput<'_>,
    scorer: &dyn CompatibilityScorer,
    max_attempts: usize,
    rng: &mut R,
) -> Result<AssignmentPlan, AssignmentError> {
    let ids: Vec<ParticipantId> = input
        .participants
        .iter()
        .filter(|p| p.status.is_eligible())
        .map(|p| p.id)
        .collect();

    if ids.len() < MIN_PARTICIPANTS {
        return Err(AssignmentError::InsufficientParticipants { found: ids.len() });
    }

    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AssignmentError::InvariantViolation(format!(
            "duplicate participant {dup} in {}",
            input.event_id
        )));
    }

    let mut self_pairings = 0usize;
    let mut repeated_pairs = 0usize;

    for attempt in 1..=max_attempts {
        let candidate = generate_candidate(&ids, rng);

        match validate_candidate(&candidate, &ids, input.existing_pairs) {
            Verdict::Valid => {
                let pairs = candidate
                    .pairs
                    .iter()
                    .map(|&(giver, receiver)| Pairing {
                        giver,
                        receiver,
                        compatibility_score: scorer.score(input.wishlists.get(&giver), input.wishlists.get(&receiver)),
                    })
                    .collect();

                debug!(
                    event_id = input.event_id.0,
                    attempt,
                    "[ss-01] Accepted candidate"
                );

                return Ok(AssignmentPlan {
                    event_id: input.event_id,
                    pairs,
                    attempts: attempt,
                });
            }
            Verdict::SelfPairing => self_pairings += 1,
            Verdict::RepeatedPair => repeated_pairs += 1,
            Verdict::NotBijective => {
                error!(
                    event_id = input.event_id.0,
                    attempt,
                    "[ss-01] Generator produced a non-bijective candidate"
                );
                return Err(AssignmentError::InvariantViolation(format!(
                    "non-bijective candidate on attempt {attempt} for {}",
                    input.event_id
                )));
            }
        }
    }

    warn!(
        event_id = input.event_id.0,
        attempts = max_attempts,
        self_pairings,
        repeated_pairs,
        history_size = input.existing_pairs.len(),
        "[ss-01] Retry budget exhausted"
    );

    Err(AssignmentError::AssignmentExhausted { attempts: max_attempts })
}

/// Assignment Service
///
/// Orchestrates the pairing pipeline:
/// 1. Read active participants
/// 2. Read prior pairs (or take them from the caller)
/// 3. Read wishlists
/// 4. Sample and validate candidates
/// 5. Return the scored plan
pub struct AssignmentService<S>
where
    S: AssignmentDataStore,
{
    store: Arc<S>,
    scorer: Arc<dyn CompatibilityScorer>,
    config: AssignmentConfig,
    rng: Mutex<StdRng>,
}

impl<S> AssignmentService<S>
where
    S: AssignmentDataStore,
{
    /// Create a new service with default config
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, AssignmentConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(store: Arc<S>, config: AssignmentConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            store,
            scorer: scorer_from_config(&config),
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Replace the scorer selected by config
    pub fn with_scorer(mut self, scorer: Arc<dyn CompatibilityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    async fn load_wishlists(
        &self,
        event_id: EventId,
        participants: &[ParticipantRef],
    ) -> Result<HashMap<ParticipantId, Wishlist>, AssignmentError> {
        let mut wishlists = HashMap::with_capacity(participants.len());
        for participant in participants {
            if let Some(wishlist) = self.store.get_wishlist(participant.user_id, event_id).await? {
                wishlists.insert(participant.id, wishlist);
            }
        }
        Ok(wishlists)
    }

    async fn run(&self, event_id: EventId, history: Option<HashSet<Pair>>) -> Result<AssignmentPlan, AssignmentError> {
        let participants = self.store.list_active_participants(event_id).await?;

        if participants.len() < MIN_PARTICIPANTS {
            warn!(
                event_id = event_id.0,
                found = participants.len(),
                "[ss-01] Not enough active participants"
            );
            return Err(AssignmentError::InsufficientParticipants {
                found: participants.len(),
            });
        }

        let existing_pairs = match history {
            Some(pairs) => pairs,
            None => self.store.list_existing_pairs(event_id).await?,
        };
        let wishlists = self.load_wishlists(event_id, &participants).await?;

        info!(
            event_id = event_id.0,
            participants = participants.len(),
            history_size = existing_pairs.len(),
            wishlists = wishlists.len(),
            "[ss-01] Generating assignments"
        );

        let input = RoundInput {
            event_id,
            participants: &participants,
            existing_pairs: &existing_pairs,
            wishlists: &wishlists,
        };

        let plan = {
            let mut rng = self.rng.lock();
            compute_assignments(&input, self.scorer.as_ref(), self.config.max_attempts, &mut *rng)?
        };

        info!(
            event_id = event_id.0,
            pairs = plan.pairs.len(),
            attempts = plan.attempts,
            "[ss-01] Assignments generated"
        );

        Ok(plan)
    }
}

#[async_trait]
impl<S> AssignmentEngineApi for AssignmentService<S>
where
    S: AssignmentDataStore + 'static,
{
    async fn generate_assignments(&self, event_id: EventId) -> Result<AssignmentPlan, AssignmentError> {
        self.run(event_id, None).await
    }

    async fn generate_assignments_with_history(
        &self,
        event_id: EventId,
        existing_pairs: HashSet<Pair>,
    ) -> Result<AssignmentPlan, AssignmentError> {
        self.run(event_id, Some(existing_pairs)).await
    }
}
