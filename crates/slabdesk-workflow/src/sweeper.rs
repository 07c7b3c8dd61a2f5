// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic reminder sweep over overdue tasks.
//!
//! The [`ReminderSweeper`] scans for incomplete tasks whose due date has
//! passed and logs a "Reminder Sent" interaction for each one. There is no
//! deduplication: a task stays in every sweep until it is completed.
//!
//! A failed scan is retried after an exponential backoff starting at
//! `retry_backoff_secs`, capped by `max_retry_backoff_secs` and by the
//! regular interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use slabdesk_config::model::SweeperConfig;
use slabdesk_core::{InteractionKind, NewInteraction, RecordStore, SlabdeskError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Scans for overdue tasks on a fixed interval.
pub struct ReminderSweeper {
    store: Arc<dyn RecordStore>,
    config: SweeperConfig,
}

impl ReminderSweeper {
    pub fn new(store: Arc<dyn RecordStore>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run one sweep and return the number of reminders logged.
    ///
    /// Only the scan query can fail the cycle. A failed reminder insert is
    /// logged and the sweep moves on to the next task.
    pub async fn run_cycle(&self) -> Result<usize, SlabdeskError> {
        let now = Utc::now();
        let overdue = self.store.list_overdue_tasks(now).await?;

        let mut sent = 0;
        for task in &overdue {
            info!(
                task_id = task.id,
                estimate_id = task.estimate_id,
                assigned_to = %task.assigned_to,
                "sending reminder for overdue task"
            );
            let reminder =
                NewInteraction::of_kind(task.estimate_id, InteractionKind::ReminderSent, now);
            match self.store.log_interaction(&reminder).await {
                Ok(_) => sent += 1,
                Err(e) => warn!(task_id = task.id, error = %e, "failed to log reminder"),
            }
        }

        debug!(overdue = overdue.len(), sent, "reminder sweep complete");
        Ok(sent)
    }

    /// Sweep until `cancel` fires. The first cycle runs immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        let interval = Duration::from_secs(self.config.interval_secs);
        let mut consecutive_failures = 0u32;
        info!(interval_secs = self.config.interval_secs, "reminder sweeper started");

        loop {
            let delay = match self.run_cycle().await {
                Ok(_) => {
                    consecutive_failures = 0;
                    interval
                }
                Err(e) => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    let delay = retry_delay(&self.config, consecutive_failures);
                    error!(
                        error = %e,
                        consecutive_failures,
                        retry_in_secs = delay.as_secs(),
                        "reminder sweep failed"
                    );
                    delay
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("reminder sweeper stopped");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Delay before the next attempt after `consecutive_failures` failed scans.
///
/// Doubles from `retry_backoff_secs` per failure, never exceeding
/// `max_retry_backoff_secs` or the regular interval.
pub fn retry_delay(config: &SweeperConfig, consecutive_failures: u32) -> Duration {
    let exponent = consecutive_failures.saturating_sub(1).min(32);
    let secs = config
        .retry_backoff_secs
        .saturating_mul(1u64 << exponent)
        .min(config.max_retry_backoff_secs)
        .min(config.interval_secs);
    Duration::from_secs(secs.max(1))
}
