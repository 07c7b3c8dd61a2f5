// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `slabdesk serve` command implementation.
//!
//! Opens the SQLite store, starts the reminder sweeper, and serves the HTTP
//! API until SIGINT or SIGTERM. On shutdown, in-flight follow-up jobs are
//! drained before the store is checkpointed and closed.

use std::sync::Arc;
use std::time::Duration;

use slabdesk_config::SlabdeskConfig;
use slabdesk_core::{RecordStore, SlabdeskError};
use slabdesk_gateway::start_server;
use slabdesk_storage::SqliteStore;
use slabdesk_workflow::shutdown;
use slabdesk_workflow::{ReminderSweeper, Services};
use tracing::{info, warn};

/// Upper bound on waiting for follow-up jobs at shutdown.
const FOLLOW_UP_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run_serve(config: SlabdeskConfig) -> Result<(), SlabdeskError> {
    init_tracing(&config.service.log_level);

    info!(name = %config.service.name, "starting slabdesk serve");

    let store = Arc::new(SqliteStore::open(config.storage.clone()).await?);
    let record_store: Arc<dyn RecordStore> = store.clone();
    let services = Services::new(record_store.clone(), config.follow_up.clone());

    let cancel = shutdown::install_signal_handler();

    let sweeper_handle = if config.sweeper.enabled {
        let sweeper = ReminderSweeper::new(record_store, config.sweeper.clone());
        let sweeper_cancel = cancel.clone();
        Some(tokio::spawn(async move { sweeper.run(sweeper_cancel).await }))
    } else {
        info!("reminder sweeper disabled");
        None
    };

    let served = start_server(&config.server, services.clone(), cancel.clone()).await;

    // The server may have failed to bind; make sure the sweeper stops too.
    cancel.cancel();
    if let Some(handle) = sweeper_handle {
        if let Err(e) = handle.await {
            warn!(error = %e, "reminder sweeper task ended abnormally");
        }
    }

    services.follow_up.drain(FOLLOW_UP_DRAIN_TIMEOUT).await;

    if let Err(e) = store.close().await {
        warn!(error = %e, "failed to checkpoint database on shutdown");
    }

    served?;
    info!("slabdesk serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays parseable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "slabdesk={log_level},tower_http={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
