//! Candidate Validator
//!
//! Checks, in order: no self-pairing, no repeated historical pair,
//! bijectivity. Stops at the first failure.

use crate::domain::entities::CandidateMapping;
use crate::domain::invariants::{invariant_bijective, invariant_no_repeated_pair, invariant_no_self_pairing};
use crate::domain::value_objects::{Pair, ParticipantId};
use std::collections::HashSet;

/// Outcome of validating one candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    SelfPairing,
    RepeatedPair,
    NotBijective,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Validate a candidate against the participant set and prior pairs.
pub fn validate_candidate(
    candidate: &CandidateMapping,
    participants: &[ParticipantId],
    existing_pairs: &HashSet<Pair>,
) -> Verdict {
    if !invariant_no_self_pairing(candidate) {
        return Verdict::SelfPairing;
    }

    if !invariant_no_repeated_pair(candidate, existing_pairs) {
        return Verdict::RepeatedPair;
    }

    // Guaranteed by the generator; failing here is a defect.
    if !invariant_bijective(candidate, participants) {
        return Verdict::NotBijective;
    }

    Verdict::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u64) -> ParticipantId {
        ParticipantId(id)
    }

    fn mapping(pairs: &[(u64, u64)]) -> CandidateMapping {
        CandidateMapping::new(pairs.iter().map(|&(g, r)| (p(g), p(r))).collect())
    }

    #[test]
    fn test_valid_derangement() {
        let verdict = validate_candidate(&mapping(&[(1, 2), (2, 3), (3, 1)]), &[p(1), p(2), p(3)], &HashSet::new());
        assert_eq!(verdict, Verdict::Valid);
        assert!(verdict.is_valid());
    }

    #[test]
    fn test_self_pairing_checked_first() {
        // Also repeats history and is not bijective; self-pairing wins.
        let existing: HashSet<Pair> = [(p(2), p(2))].into_iter().collect();
        let verdict = validate_candidate(&mapping(&[(1, 1), (2, 2)]), &[p(1), p(2), p(3)], &existing);
        assert_eq!(verdict, Verdict::SelfPairing);
    }

    #[test]
    fn test_repeated_pair_checked_before_bijectivity() {
        let existing: HashSet<Pair> = [(p(1), p(2))].into_iter().collect();
        let verdict = validate_candidate(&mapping(&[(1, 2), (2, 1)]), &[p(1), p(2), p(3)], &existing);
        assert_eq!(verdict, Verdict::RepeatedPair);
    }

    #[test]
    fn test_duplicate_receiver_not_bijective() {
        let verdict = validate_candidate(&mapping(&[(1, 2), (2, 3), (3, 2)]), &[p(1), p(2), p(3)], &HashSet::new());
        assert_eq!(verdict, Verdict::NotBijective);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let candidate = mapping(&[(1, 3), (2, 1), (3, 2)]);
        let participants = [p(1), p(2), p(3)];
        let existing: HashSet<Pair> = [(p(2), p(1))].into_iter().collect();

        let first = validate_candidate(&candidate, &participants, &existing);
        let second = validate_candidate(&candidate, &participants, &existing);
        assert_eq!(first, second);
        assert_eq!(first, Verdict::RepeatedPair);
    }
}
