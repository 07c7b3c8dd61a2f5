// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Estimate lifecycle: validated CRUD plus the "Sent" transition trigger.

use std::sync::Arc;

use slabdesk_core::validation::validate_estimate;
use slabdesk_core::{Estimate, EstimateDraft, RecordStore, SlabdeskError};
use tracing::info;

use crate::follow_up::FollowUpDispatcher;

/// Estimate operations exposed to the API layer.
///
/// Creating an estimate already marked "Sent", or updating one into "Sent"
/// from any other status, dispatches the follow-up workflow. The request
/// never waits on it.
pub struct EstimateLifecycle {
    store: Arc<dyn RecordStore>,
    follow_up: FollowUpDispatcher,
}

impl EstimateLifecycle {
    pub fn new(store: Arc<dyn RecordStore>, follow_up: FollowUpDispatcher) -> Self {
        Self { store, follow_up }
    }

    /// Validate and persist a new estimate.
    pub async fn create(&self, draft: &EstimateDraft) -> Result<Estimate, SlabdeskError> {
        validate_estimate(draft)?;
        let estimate = self.store.create_estimate(draft).await?;
        info!(estimate_id = estimate.id, status = %estimate.draft.status, "estimate created");

        if estimate.draft.is_sent() {
            self.follow_up.dispatch(estimate.id);
        }
        Ok(estimate)
    }

    pub async fn get(&self, id: i64) -> Result<Estimate, SlabdeskError> {
        self.store
            .get_estimate(id)
            .await?
            .ok_or_else(|| SlabdeskError::estimate_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Estimate>, SlabdeskError> {
        self.store.list_estimates().await
    }

    /// Replace every field of an estimate and return the stored result.
    ///
    /// The transition check compares against the status this update replaced,
    /// read atomically by the store, so two concurrent updates to "Sent" fire
    /// the follow-up once.
    pub async fn update(&self, id: i64, draft: &EstimateDraft) -> Result<Estimate, SlabdeskError> {
        validate_estimate(draft)?;
        let update = self
            .store
            .update_estimate(id, draft)
            .await?
            .ok_or_else(|| SlabdeskError::estimate_not_found(id))?;

        if update.entered_sent() {
            info!(
                estimate_id = id,
                previous_status = %update.previous_status,
                "estimate sent, scheduling follow-up"
            );
            self.follow_up.dispatch(id);
        } else {
            info!(estimate_id = id, "estimate updated");
        }
        Ok(update.estimate)
    }

    /// Delete an estimate along with its tasks and interactions.
    pub async fn delete(&self, id: i64) -> Result<(), SlabdeskError> {
        if !self.store.estimate_exists(id).await? {
            return Err(SlabdeskError::estimate_not_found(id));
        }
        // A concurrent delete can win between the check and here.
        if !self.store.delete_estimate(id).await? {
            return Err(SlabdeskError::estimate_not_found(id));
        }
        info!(estimate_id = id, "estimate deleted");
        Ok(())
    }
}
