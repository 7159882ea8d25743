//! Admin action boundary
//!
//! - Accept: assign, reshuffle and gift status requests
//! - Commit: rounds through `AssignmentRepository`

pub mod handler;
pub mod payloads;

pub use handler::AdminActionHandler;
pub use payloads::*;
