//! Ports module for the Assignment Engine
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::AssignmentEngineApi;
pub use outbound::{AssignmentDataStore, AssignmentRepository, CompatibilityScorer};
