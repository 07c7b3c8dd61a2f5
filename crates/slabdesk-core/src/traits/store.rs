// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for relational persistence backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SlabdeskError;
use crate::types::{
    CustomerInteraction, Estimate, EstimateDraft, EstimateUpdate, HealthStatus, NewInteraction,
    NewTask, Task,
};

/// Persistence of estimates, tasks, and customer interactions.
///
/// Implementations must cascade estimate deletion to dependent tasks and
/// interactions. Each method is a single store round-trip; no method spans
/// more than one caller-visible transaction.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Insert an estimate and return it with its assigned identifier.
    async fn create_estimate(&self, draft: &EstimateDraft) -> Result<Estimate, SlabdeskError>;

    /// Fetch one estimate.
    async fn get_estimate(&self, id: i64) -> Result<Option<Estimate>, SlabdeskError>;

    /// Fetch every estimate in identifier order.
    async fn list_estimates(&self) -> Result<Vec<Estimate>, SlabdeskError>;

    /// Overwrite every field of an estimate.
    ///
    /// Reads the stored status and applies the update atomically, so the
    /// returned `previous_status` is exactly the value this update replaced.
    /// Returns `None` when no estimate has this identifier.
    async fn update_estimate(
        &self,
        id: i64,
        draft: &EstimateDraft,
    ) -> Result<Option<EstimateUpdate>, SlabdeskError>;

    /// Whether an estimate with this identifier exists.
    async fn estimate_exists(&self, id: i64) -> Result<bool, SlabdeskError>;

    /// Delete an estimate and its dependents. Returns `false` if nothing was deleted.
    async fn delete_estimate(&self, id: i64) -> Result<bool, SlabdeskError>;

    /// Insert a task. Returns `None` when the owning estimate does not exist.
    async fn create_task(&self, task: &NewTask) -> Result<Option<Task>, SlabdeskError>;

    /// Fetch every task in identifier order.
    async fn list_tasks(&self) -> Result<Vec<Task>, SlabdeskError>;

    /// Set the completed flag. Returns `false` if the task does not exist.
    async fn set_task_completed(&self, id: i64, completed: bool) -> Result<bool, SlabdeskError>;

    /// Reassign a task. Returns `false` if the task does not exist.
    async fn assign_task(&self, id: i64, assignee: &str) -> Result<bool, SlabdeskError>;

    /// Incomplete tasks whose due date is strictly before `now`.
    async fn list_overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, SlabdeskError>;

    /// Append an interaction to the log.
    async fn log_interaction(
        &self,
        interaction: &NewInteraction,
    ) -> Result<CustomerInteraction, SlabdeskError>;

    /// Fetch every interaction in identifier order.
    async fn list_interactions(&self) -> Result<Vec<CustomerInteraction>, SlabdeskError>;

    /// Round-trip the backend.
    async fn health_check(&self) -> Result<HealthStatus, SlabdeskError>;
}
