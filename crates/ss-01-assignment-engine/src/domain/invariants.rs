//! Domain invariants for a round of assignments
//!
//! Each check is a pure predicate over a candidate mapping. The validator
//! composes them in a fixed order.

use super::entities::CandidateMapping;
use super::value_objects::{Pair, ParticipantId};
use std::collections::HashSet;

/// INVARIANT-1: No Self-Pairing
/// Nobody is assigned as their own receiver.
pub fn invariant_no_self_pairing(candidate: &CandidateMapping) -> bool {
    candidate.pairs.iter().all(|(giver, receiver)| giver != receiver)
}

/// INVARIANT-2: No Repeated Pair
/// No (giver, receiver) pair from prior rounds is reused.
pub fn invariant_no_repeated_pair(candidate: &CandidateMapping, existing_pairs: &HashSet<Pair>) -> bool {
    if existing_pairs.is_empty() {
        return true;
    }
    candidate
        .pairs
        .iter()
        .all(|pair| !existing_pairs.contains(pair))
}

/// INVARIANT-3: Bijectivity
/// Every participant gives exactly once and receives exactly once, and
/// nobody outside the participant set appears.
pub fn invariant_bijective(candidate: &CandidateMapping, participants: &[ParticipantId]) -> bool {
    if candidate.len() != participants.len() {
        return false;
    }

    let expected: HashSet<ParticipantId> = participants.iter().copied().collect();
    if expected.len() != participants.len() {
        return false;
    }

    let mut givers = HashSet::with_capacity(candidate.len());
    let mut receivers = HashSet::with_capacity(candidate.len());

    for (giver, receiver) in &candidate.pairs {
        if !givers.insert(*giver) || !receivers.insert(*receiver) {
            return false;
        }
    }

    givers == expected && receivers == expected
}
