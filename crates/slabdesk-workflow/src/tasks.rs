// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task operations and the read side of the interaction log.

use std::sync::Arc;

use slabdesk_core::validation::{validate_assignee, validate_new_task};
use slabdesk_core::{CustomerInteraction, NewTask, RecordStore, SlabdeskError, Task};
use tracing::info;

/// Task operations exposed to the API layer.
pub struct TaskService {
    store: Arc<dyn RecordStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a task. The owning estimate must exist.
    pub async fn create(&self, task: &NewTask) -> Result<Task, SlabdeskError> {
        validate_new_task(task)?;
        let created = self.store.create_task(task).await?.ok_or_else(|| {
            SlabdeskError::Validation(format!("estimate {} does not exist", task.estimate_id))
        })?;
        info!(
            task_id = created.id,
            estimate_id = created.estimate_id,
            "task created"
        );
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Task>, SlabdeskError> {
        self.store.list_tasks().await
    }

    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<(), SlabdeskError> {
        if !self.store.set_task_completed(id, completed).await? {
            return Err(SlabdeskError::task_not_found(id));
        }
        info!(task_id = id, completed, "task completion updated");
        Ok(())
    }

    pub async fn assign(&self, id: i64, assignee: &str) -> Result<(), SlabdeskError> {
        validate_assignee(assignee)?;
        if !self.store.assign_task(id, assignee).await? {
            return Err(SlabdeskError::task_not_found(id));
        }
        info!(task_id = id, assigned_to = %assignee, "task reassigned");
        Ok(())
    }
}

/// Read access to the append-only interaction log.
pub struct InteractionLog {
    store: Arc<dyn RecordStore>,
}

impl InteractionLog {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<CustomerInteraction>, SlabdeskError> {
        self.store.list_interactions().await
    }
}
