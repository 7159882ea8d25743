//! Candidate Generator
//!
//! Unrestricted shuffle of the receiver list. The result is a uniformly
//! random permutation of the participants; it may contain fixed points, which
//! the validator rejects.

use crate::domain::entities::CandidateMapping;
use crate::domain::value_objects::ParticipantId;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate one candidate mapping giver -> receiver.
///
/// Givers keep the input order; receivers are a shuffled copy of the same
/// ids. Pure function of `rng`.
pub fn generate_candidate<R: Rng + ?Sized>(participants: &[ParticipantId], rng: &mut R) -> CandidateMapping {
    let mut receivers = participants.to_vec();
    receivers.shuffle(rng);

    let pairs = participants
        .iter()
        .copied()
        .zip(receivers)
        .collect();

    CandidateMapping::new(pairs)
}
