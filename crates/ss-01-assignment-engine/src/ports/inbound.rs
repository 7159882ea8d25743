//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::AssignmentPlan;
use crate::domain::errors::AssignmentError;
use crate::domain::value_objects::{EventId, Pair};
use async_trait::async_trait;
use std::collections::HashSet;

/// Primary Assignment Engine API
#[async_trait]
pub trait AssignmentEngineApi: Send + Sync {
    /// Compute a valid round for the event.
    ///
    /// This is the main entry point. It:
    /// 1. Reads active participants, prior pairs and wishlists
    /// 2. Samples candidates until one validates or the budget runs out
    /// 3. Scores every pair of the accepted candidate
    ///
    /// Nothing is persisted; the caller commits the returned plan.
    async fn generate_assignments(&self, event_id: EventId) -> Result<AssignmentPlan, AssignmentError>;

    /// Same as `generate_assignments`, with caller-supplied history in place
    /// of the data store's prior pairs.
    async fn generate_assignments_with_history(
        &self,
        event_id: EventId,
        existing_pairs: HashSet<Pair>,
    ) -> Result<AssignmentPlan, AssignmentError>;
}
