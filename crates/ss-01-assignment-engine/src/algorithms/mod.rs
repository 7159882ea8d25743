//! Algorithms module for the Assignment Engine
//!
//! Contains:
//! - Candidate generator (unrestricted shuffle)
//! - Candidate validator
//! - Compatibility scorers

pub mod compatibility;
pub mod derangement;
pub mod validator;

pub use compatibility::{scorer_from_config, BaselineScorer, PreferenceOverlapScorer};
pub use derangement::generate_candidate;
pub use validator::{validate_candidate, Verdict};
