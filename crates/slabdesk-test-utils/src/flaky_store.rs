// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure-injecting [`RecordStore`] wrapper.
//!
//! `FlakyStore` forwards every call to an inner store unless the operation
//! has been marked as failing, in which case it returns a storage error
//! without touching the inner store. Calls are counted per operation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use slabdesk_core::{
    CustomerInteraction, Estimate, EstimateDraft, EstimateUpdate, HealthStatus, NewInteraction,
    NewTask, RecordStore, SlabdeskError, Task,
};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateEstimate,
    GetEstimate,
    ListEstimates,
    UpdateEstimate,
    EstimateExists,
    DeleteEstimate,
    CreateTask,
    ListTasks,
    SetTaskCompleted,
    AssignTask,
    ListOverdueTasks,
    LogInteraction,
    ListInteractions,
    HealthCheck,
}

/// A [`RecordStore`] that fails selected operations on demand.
pub struct FlakyStore {
    inner: Arc<dyn RecordStore>,
    failing: Mutex<HashSet<StoreOp>>,
    calls: Mutex<HashMap<StoreOp, usize>>,
}

impl FlakyStore {
    /// Wrap `inner`; nothing fails until [`fail`](Self::fail) is called.
    pub fn new(inner: Arc<dyn RecordStore>) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Make every later call of `op` return a storage error.
    pub async fn fail(&self, op: StoreOp) {
        self.failing.lock().await.insert(op);
    }

    /// Let `op` reach the inner store again.
    pub async fn heal(&self, op: StoreOp) {
        self.failing.lock().await.remove(&op);
    }

    /// How many times `op` has been called, failed or not.
    pub async fn calls(&self, op: StoreOp) -> usize {
        self.calls.lock().await.get(&op).copied().unwrap_or(0)
    }

    async fn enter(&self, op: StoreOp) -> Result<(), SlabdeskError> {
        *self.calls.lock().await.entry(op).or_insert(0) += 1;
        if self.failing.lock().await.contains(&op) {
            return Err(SlabdeskError::Storage {
                source: format!("injected failure in {op:?}").into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn create_estimate(&self, draft: &EstimateDraft) -> Result<Estimate, SlabdeskError> {
        self.enter(StoreOp::CreateEstimate).await?;
        self.inner.create_estimate(draft).await
    }

    async fn get_estimate(&self, id: i64) -> Result<Option<Estimate>, SlabdeskError> {
        self.enter(StoreOp::GetEstimate).await?;
        self.inner.get_estimate(id).await
    }

    async fn list_estimates(&self) -> Result<Vec<Estimate>, SlabdeskError> {
        self.enter(StoreOp::ListEstimates).await?;
        self.inner.list_estimates().await
    }

    async fn update_estimate(
        &self,
        id: i64,
        draft: &EstimateDraft,
    ) -> Result<Option<EstimateUpdate>, SlabdeskError> {
        self.enter(StoreOp::UpdateEstimate).await?;
        self.inner.update_estimate(id, draft).await
    }

    async fn estimate_exists(&self, id: i64) -> Result<bool, SlabdeskError> {
        self.enter(StoreOp::EstimateExists).await?;
        self.inner.estimate_exists(id).await
    }

    async fn delete_estimate(&self, id: i64) -> Result<bool, SlabdeskError> {
        self.enter(StoreOp::DeleteEstimate).await?;
        self.inner.delete_estimate(id).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Option<Task>, SlabdeskError> {
        self.enter(StoreOp::CreateTask).await?;
        self.inner.create_task(task).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, SlabdeskError> {
        self.enter(StoreOp::ListTasks).await?;
        self.inner.list_tasks().await
    }

    async fn set_task_completed(&self, id: i64, completed: bool) -> Result<bool, SlabdeskError> {
        self.enter(StoreOp::SetTaskCompleted).await?;
        self.inner.set_task_completed(id, completed).await
    }

    async fn assign_task(&self, id: i64, assignee: &str) -> Result<bool, SlabdeskError> {
        self.enter(StoreOp::AssignTask).await?;
        self.inner.assign_task(id, assignee).await
    }

    async fn list_overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, SlabdeskError> {
        self.enter(StoreOp::ListOverdueTasks).await?;
        self.inner.list_overdue_tasks(now).await
    }

    async fn log_interaction(
        &self,
        interaction: &NewInteraction,
    ) -> Result<CustomerInteraction, SlabdeskError> {
        self.enter(StoreOp::LogInteraction).await?;
        self.inner.log_interaction(interaction).await
    }

    async fn list_interactions(&self) -> Result<Vec<CustomerInteraction>, SlabdeskError> {
        self.enter(StoreOp::ListInteractions).await?;
        self.inner.list_interactions().await
    }

    async fn health_check(&self) -> Result<HealthStatus, SlabdeskError> {
        self.enter(StoreOp::HealthCheck).await?;
        self.inner.health_check().await
    }
}
