//! # SS-01: Assignment Engine
//!
//! Secret Santa pairing by rejection sampling. Each round is a derangement
//! of the event's active participants that repeats no pair from the
//! pairing history.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (ParticipantRef, Wishlist, CandidateMapping, AssignmentPlan)
//! - **Algorithms**: Candidate shuffle, validator, compatibility scorers
//! - **Ports**: Inbound (AssignmentEngineApi) and Outbound (AssignmentDataStore, AssignmentRepository, CompatibilityScorer)
//! - **Application**: Service orchestration and the pure retry loop
//! - **IPC**: Admin action handler (assign, reshuffle, gift status)
//! - **Adapters**: In-memory store

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::{DataSet, InMemoryAssignmentStore};
pub use application::service::{compute_assignments, AssignmentService, RoundInput, MIN_PARTICIPANTS};
pub use config::{AssignmentConfig, ConfigError, ReshufflePolicy, ScoringStrategy};
pub use domain::entities::*;
pub use domain::errors::{AdminError, AssignmentError, DataStoreError, EXHAUSTED_REASON};
pub use domain::value_objects::*;
pub use ipc::{
    AdminActionHandler, AdminActionResponse, AssignRequest, GiftStatusRequest, Requester, ReshuffleRequest,
};
pub use ports::inbound::AssignmentEngineApi;
pub use ports::outbound::{AssignmentDataStore, AssignmentRepository, CompatibilityScorer};
