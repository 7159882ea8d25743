//! Error types for the Assignment Engine

use super::value_objects::{EventId, ParticipantId, UserId};
use thiserror::Error;

/// Reason reported when the retry budget is spent without a valid candidate.
pub const EXHAUSTED_REASON: &str = "could not generate valid assignments after multiple attempts";

/// Errors returned by the engine.
///
/// `InsufficientParticipants` and `AssignmentExhausted` are expected
/// outcomes. `InvariantViolation` means the generator broke its contract.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Fewer than two active participants
    #[error("Need at least 2 participants, found {found}")]
    InsufficientParticipants { found: usize },

    /// Every attempt produced an invalid candidate
    #[error("{reason} ({attempts} attempts)", reason = EXHAUSTED_REASON)]
    AssignmentExhausted { attempts: usize },

    /// Generator returned a non-bijective candidate
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Data store access failed
    #[error(transparent)]
    DataStore(#[from] DataStoreError),
}

impl AssignmentError {
    /// True for bugs, false for environmental conditions the caller handles.
    pub fn is_defect(&self) -> bool {
        matches!(self, AssignmentError::InvariantViolation(_))
    }
}

/// Data store failures
#[derive(Debug, Error)]
pub enum DataStoreError {
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Errors raised by admin actions before or around the engine
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Permission denied for {0}")]
    Unauthorized(UserId),

    #[error("Assignment already done")]
    AlreadyAssigned,

    #[error("Need at least 2 participants, found {found}")]
    InsufficientParticipants { found: usize },

    #[error("No assignment found for giver {0}")]
    AssignmentNotFound(ParticipantId),

    #[error("Invalid status: {0}")]
    InvalidGiftStatus(String),

    #[error(transparent)]
    Engine(#[from] AssignmentError),

    #[error(transparent)]
    DataStore(#[from] DataStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_error_display() {
        let err = AssignmentError::AssignmentExhausted { attempts: 100 };
        assert_eq!(
            err.to_string(),
            "could not generate valid assignments after multiple attempts (100 attempts)"
        );
    }

    #[test]
    fn test_insufficient_participants_display() {
        let err = AssignmentError::InsufficientParticipants { found: 1 };
        assert_eq!(err.to_string(), "Need at least 2 participants, found 1");
    }

    #[test]
    fn test_only_invariant_violation_is_defect() {
        assert!(AssignmentError::InvariantViolation("dup".into()).is_defect());
        assert!(!AssignmentError::AssignmentExhausted { attempts: 1 }.is_defect());
        assert!(!AssignmentError::InsufficientParticipants { found: 0 }.is_defect());
    }

    #[test]
    fn test_admin_error_wraps_engine_error() {
        let err: AdminError = AssignmentError::InsufficientParticipants { found: 0 }.into();
        assert_eq!(err.to_string(), "Need at least 2 participants, found 0");
    }
}
