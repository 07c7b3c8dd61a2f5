// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Business workflows for Slabdesk.
//!
//! [`Services`] bundles everything the HTTP gateway calls into:
//! - [`EstimateLifecycle`] for estimate CRUD and the "Sent" trigger
//! - [`TaskService`] for task creation, completion, and reassignment
//! - [`InteractionLog`] for reading the audit trail
//!
//! The [`ReminderSweeper`] runs beside the gateway and shares the same store.

pub mod follow_up;
pub mod lifecycle;
pub mod shutdown;
pub mod sweeper;
pub mod tasks;

use std::sync::Arc;

use slabdesk_config::model::FollowUpConfig;
use slabdesk_core::{HealthStatus, RecordStore};

pub use follow_up::{FollowUpDispatcher, FollowUpOutcome, run_follow_up};
pub use lifecycle::EstimateLifecycle;
pub use sweeper::ReminderSweeper;
pub use tasks::{InteractionLog, TaskService};

/// Shared service handles built over a single record store.
#[derive(Clone)]
pub struct Services {
    store: Arc<dyn RecordStore>,
    pub estimates: Arc<EstimateLifecycle>,
    pub tasks: Arc<TaskService>,
    pub interactions: Arc<InteractionLog>,
    /// Kept so shutdown can drain in-flight follow-up jobs.
    pub follow_up: FollowUpDispatcher,
}

impl Services {
    pub fn new(store: Arc<dyn RecordStore>, follow_up_config: FollowUpConfig) -> Self {
        let follow_up = FollowUpDispatcher::new(store.clone(), follow_up_config);
        Self {
            estimates: Arc::new(EstimateLifecycle::new(store.clone(), follow_up.clone())),
            tasks: Arc::new(TaskService::new(store.clone())),
            interactions: Arc::new(InteractionLog::new(store.clone())),
            follow_up,
            store,
        }
    }

    /// Probe the underlying store.
    pub async fn health(&self) -> HealthStatus {
        match self.store.health_check().await {
            Ok(status) => status,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
