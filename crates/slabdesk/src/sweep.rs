// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `slabdesk sweep` command implementation.

use std::sync::Arc;

use slabdesk_config::SlabdeskConfig;
use slabdesk_core::SlabdeskError;
use slabdesk_storage::SqliteStore;
use slabdesk_workflow::ReminderSweeper;

use crate::serve::init_tracing;

/// Run a single reminder sweep and return how many reminders were logged.
pub async fn run_sweep(config: SlabdeskConfig) -> Result<usize, SlabdeskError> {
    init_tracing(&config.service.log_level);
    sweep_once(config).await
}

async fn sweep_once(config: SlabdeskConfig) -> Result<usize, SlabdeskError> {
    let store = Arc::new(SqliteStore::open(config.storage.clone()).await?);
    let sweeper = ReminderSweeper::new(store.clone(), config.sweeper.clone());
    let sent = sweeper.run_cycle().await;
    store.close().await?;
    sent
}
