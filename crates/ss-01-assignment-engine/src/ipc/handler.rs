//! Admin Action Handler
//!
//! ## Security Boundaries
//!
//! - Assign and reshuffle: event admin or super admin only
//! - Gift status: the giver's own user only
//! - Actions on one event run one at a time, from the first read to the commit

use crate::application::service::AssignmentService;
use crate::config::{AssignmentConfig, ReshufflePolicy};
use crate::domain::entities::{AssignmentPlan, Event};
use crate::domain::errors::{AdminError, AssignmentError, DataStoreError};
use crate::domain::value_objects::{EventId, GiftStatus, UserRole};
use crate::ipc::payloads::{
    AdminActionResponse, AssignRequest, GiftStatusRequest, Requester, ReshuffleRequest,
};
use crate::ports::inbound::AssignmentEngineApi;
use crate::ports::outbound::{AssignmentDataStore, AssignmentRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{error, info, warn};

type EventLock = Arc<tokio::sync::Mutex<()>>;

/// Handler for admin actions on events.
///
/// Gates each request, delegates pairing to `AssignmentService` and commits
/// the result through `AssignmentRepository`.
pub struct AdminActionHandler<S>
where
    S: AssignmentDataStore + AssignmentRepository + 'static,
{
    store: Arc<S>,
    service: AssignmentService<S>,
    event_locks: parking_lot::Mutex<HashMap<EventId, EventLock>>,
}

impl<S> AdminActionHandler<S>
where
    S: AssignmentDataStore + AssignmentRepository + 'static,
{
    /// Create a new handler with default config.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, AssignmentConfig::default())
    }

    /// Create a new handler with custom config.
    pub fn with_config(store: Arc<S>, config: AssignmentConfig) -> Self {
        Self::with_service(store.clone(), AssignmentService::with_config(store, config))
    }

    /// Create a handler around an existing service.
    pub fn with_service(store: Arc<S>, service: AssignmentService<S>) -> Self {
        Self {
            store,
            service,
            event_locks: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Handle an AssignRequest.
    ///
    /// Rejects events that already have a committed round.
    pub async fn handle_assign(&self, requester: Requester, request: AssignRequest) -> AdminActionResponse {
        let event_id = request.event_id;
        let lock = self.event_lock(event_id);
        let result = {
            let _guard = lock.lock().await;
            self.assign(requester, event_id).await
        };
        self.release_event_lock(event_id, lock);

        match result {
            Ok(plan) => {
                info!(
                    "[ss-01] ✓ Assigned {} pairs for {} after {} attempts",
                    plan.pairs.len(),
                    event_id,
                    plan.attempts
                );
                AdminActionResponse::committed(event_id, plan.pairs, "Assignments generated successfully")
            }
            Err(e) => Self::failure(event_id, "assign", e),
        }
    }

    /// Handle a ReshuffleRequest.
    ///
    /// The current round stays in place unless a new one is committed.
    pub async fn handle_reshuffle(&self, requester: Requester, request: ReshuffleRequest) -> AdminActionResponse {
        let event_id = request.event_id;
        let policy = request.policy.unwrap_or(self.service.config().reshuffle_policy);
        let lock = self.event_lock(event_id);
        let result = {
            let _guard = lock.lock().await;
            self.reshuffle(requester, event_id, policy).await
        };
        self.release_event_lock(event_id, lock);

        match result {
            Ok(plan) => {
                info!(
                    "[ss-01] ✓ Reshuffled {} pairs for {} ({:?})",
                    plan.pairs.len(),
                    event_id,
                    policy
                );
                AdminActionResponse::committed(event_id, plan.pairs, "Assignments reshuffled successfully")
            }
            Err(e) => Self::failure(event_id, "reshuffle", e),
        }
    }

    /// Handle a GiftStatusRequest.
    pub async fn handle_gift_status(&self, requester: Requester, request: GiftStatusRequest) -> AdminActionResponse {
        let event_id = request.event_id;
        let lock = self.event_lock(event_id);
        let result = {
            let _guard = lock.lock().await;
            self.update_gift_status(requester, &request).await
        };
        self.release_event_lock(event_id, lock);

        match result {
            Ok(status) => {
                info!(
                    "[ss-01] Gift status of {} set to {}",
                    request.giver, status
                );
                AdminActionResponse::gift_status_updated(event_id, status)
            }
            Err(e) => Self::failure(event_id, "gift status", e),
        }
    }

    async fn assign(&self, requester: Requester, event_id: EventId) -> Result<AssignmentPlan, AdminError> {
        let event = self.load_event(event_id).await?;
        Self::authorize(&requester, &event)?;

        if event.assignment_done {
            return Err(AdminError::AlreadyAssigned);
        }

        let plan = self
            .service
            .generate_assignments(event_id)
            .await
            .map_err(Self::engine_error)?;
        self.store.commit_round(&plan).await?;
        Ok(plan)
    }

    async fn reshuffle(
        &self,
        requester: Requester,
        event_id: EventId,
        policy: ReshufflePolicy,
    ) -> Result<AssignmentPlan, AdminError> {
        let event = self.load_event(event_id).await?;
        Self::authorize(&requester, &event)?;

        let history = match policy {
            ReshufflePolicy::AvoidPrevious => self.store.list_existing_pairs(event_id).await?,
            ReshufflePolicy::Unconstrained => HashSet::new(),
        };

        let plan = self
            .service
            .generate_assignments_with_history(event_id, history)
            .await
            .map_err(Self::engine_error)?;
        self.store.commit_round(&plan).await?;
        Ok(plan)
    }

    async fn update_gift_status(&self, requester: Requester, request: &GiftStatusRequest) -> Result<GiftStatus, AdminError> {
        let status: GiftStatus = request
            .status
            .parse()
            .map_err(|_| AdminError::InvalidGiftStatus(request.status.clone()))?;

        let giver = self
            .store
            .get_participant(request.giver)
            .await?
            .filter(|p| p.event_id == request.event_id)
            .ok_or(AdminError::AssignmentNotFound(request.giver))?;

        if giver.user_id != requester.user_id {
            return Err(AdminError::Unauthorized(requester.user_id));
        }

        self.store
            .get_assignment(request.giver)
            .await?
            .filter(|a| a.event_id == request.event_id)
            .ok_or(AdminError::AssignmentNotFound(request.giver))?;

        let updated = self.store.set_gift_status(request.giver, status).await?;
        Ok(updated.gift_status)
    }

    async fn load_event(&self, event_id: EventId) -> Result<Event, AdminError> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or(AdminError::EventNotFound(event_id))
    }

    fn authorize(requester: &Requester, event: &Event) -> Result<(), AdminError> {
        if requester.role == UserRole::SuperAdmin || requester.user_id == event.admin_id {
            Ok(())
        } else {
            Err(AdminError::Unauthorized(requester.user_id))
        }
    }

    fn engine_error(err: AssignmentError) -> AdminError {
        match err {
            AssignmentError::InsufficientParticipants { found } => AdminError::InsufficientParticipants { found },
            AssignmentError::DataStore(e) => AdminError::DataStore(e),
            other => AdminError::Engine(other),
        }
    }

    fn failure(event_id: EventId, action: &str, err: AdminError) -> AdminActionResponse {
        match &err {
            AdminError::Engine(e) if e.is_defect() => {
                error!("[ss-01] ❌ {} failed for {}: {}", action, event_id, e);
            }
            AdminError::DataStore(DataStoreError::Storage(_)) => {
                error!("[ss-01] ❌ {} failed for {}: {}", action, event_id, err);
            }
            _ => {
                warn!("[ss-01] {} rejected for {}: {}", action, event_id, err);
            }
        }
        AdminActionResponse::failure(event_id, err)
    }

    fn event_lock(&self, event_id: EventId) -> EventLock {
        self.event_locks.lock().entry(event_id).or_default().clone()
    }

    /// Drop the map entry once no other action holds or awaits it.
    fn release_event_lock(&self, event_id: EventId, lock: EventLock) {
        let mut locks = self.event_locks.lock();
        // One reference in the map, one in `lock`
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&event_id);
        }
    }
}
