// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up workflow fired when an estimate enters the "Sent" status.
//!
//! The workflow writes a task and then a "Reminder Created" interaction as two
//! independent statements. Jobs run detached from the request that triggered
//! them on a [`TaskTracker`], with best-effort semantics: failures are logged
//! and never reach the caller, and a job lost to a crash is not retried.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use slabdesk_config::model::FollowUpConfig;
use slabdesk_core::{InteractionKind, NewInteraction, NewTask, RecordStore};
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

/// What a single follow-up run managed to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUpOutcome {
    /// Both the task and the interaction were written.
    Completed { task_id: i64, interaction_id: i64 },
    /// The estimate was deleted before the task could be written.
    EstimateMissing,
    /// The task insert failed; the interaction was skipped.
    TaskFailed,
    /// The task was written but the interaction insert failed.
    InteractionFailed { task_id: i64 },
}

/// Run the follow-up workflow for one estimate.
///
/// The task falls due `due_after_hours` after `now` and is assigned to the
/// configured default assignee.
pub async fn run_follow_up(
    store: &dyn RecordStore,
    config: &FollowUpConfig,
    estimate_id: i64,
    now: DateTime<Utc>,
) -> FollowUpOutcome {
    let task = NewTask {
        estimate_id,
        assigned_to: config.default_assignee.clone(),
        due_date: Some(now + TimeDelta::hours(i64::from(config.due_after_hours))),
        completed: false,
    };

    let task = match store.create_task(&task).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            warn!(estimate_id, "estimate disappeared before follow-up task was created");
            return FollowUpOutcome::EstimateMissing;
        }
        Err(e) => {
            error!(estimate_id, error = %e, "failed to create follow-up task");
            return FollowUpOutcome::TaskFailed;
        }
    };

    let interaction = NewInteraction::of_kind(estimate_id, InteractionKind::ReminderCreated, now);
    match store.log_interaction(&interaction).await {
        Ok(logged) => {
            info!(
                estimate_id,
                task_id = task.id,
                due = %task.due_date,
                "follow-up task scheduled"
            );
            FollowUpOutcome::Completed {
                task_id: task.id,
                interaction_id: logged.id,
            }
        }
        Err(e) => {
            error!(
                estimate_id,
                task_id = task.id,
                error = %e,
                "failed to log reminder-created interaction"
            );
            FollowUpOutcome::InteractionFailed { task_id: task.id }
        }
    }
}

/// Runs follow-up workflows in the background.
///
/// Cloning is cheap; clones share the same job tracker.
#[derive(Clone)]
pub struct FollowUpDispatcher {
    store: Arc<dyn RecordStore>,
    config: Arc<FollowUpConfig>,
    tracker: TaskTracker,
}

impl FollowUpDispatcher {
    pub fn new(store: Arc<dyn RecordStore>, config: FollowUpConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            tracker: TaskTracker::new(),
        }
    }

    /// Start the workflow for `estimate_id` without waiting for it.
    pub fn dispatch(&self, estimate_id: i64) {
        let store = self.store.clone();
        let config = self.config.clone();
        debug!(estimate_id, "dispatching follow-up workflow");
        self.tracker.spawn(async move {
            run_follow_up(store.as_ref(), &config, estimate_id, Utc::now()).await;
        });
    }

    /// Number of jobs still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait up to `timeout` for running jobs to finish.
    ///
    /// Returns `true` if every job finished in time. The dispatcher accepts
    /// new jobs again afterwards.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let pending = self.tracker.len();
        self.tracker.close();
        let finished = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();

        if finished {
            debug!(pending, "follow-up jobs drained");
        } else {
            warn!(
                remaining = self.tracker.len(),
                "timeout reached, follow-up jobs abandoned"
            );
        }
        finished
    }
}
