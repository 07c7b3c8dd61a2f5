// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for integration testing.
//!
//! `TestHarness` opens a SQLite store in a temp directory and wraps it in a
//! [`FlakyStore`] so tests can inject storage failures. The config it carries
//! points at the same database.

use std::sync::Arc;

use slabdesk_config::model::{SlabdeskConfig, StorageConfig};
use slabdesk_core::{RecordStore, SlabdeskError};
use slabdesk_storage::SqliteStore;

use crate::flaky_store::FlakyStore;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    due_after_hours: Option<u32>,
    default_assignee: Option<String>,
    sweep_interval_secs: Option<u64>,
    retry_backoff_secs: Option<(u64, u64)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            due_after_hours: None,
            default_assignee: None,
            sweep_interval_secs: None,
            retry_backoff_secs: None,
        }
    }

    /// Override the follow-up due delay.
    pub fn with_due_after_hours(mut self, hours: u32) -> Self {
        self.due_after_hours = Some(hours);
        self
    }

    /// Override the assignee placed on follow-up tasks.
    pub fn with_default_assignee(mut self, assignee: &str) -> Self {
        self.default_assignee = Some(assignee.to_string());
        self
    }

    /// Override the sweeper interval.
    pub fn with_sweep_interval_secs(mut self, secs: u64) -> Self {
        self.sweep_interval_secs = Some(secs);
        self
    }

    /// Override the sweeper retry backoff (initial, max).
    pub fn with_retry_backoff_secs(mut self, initial: u64, max: u64) -> Self {
        self.retry_backoff_secs = Some((initial, max));
        self
    }

    /// Build the harness, creating the temp database.
    pub async fn build(self) -> Result<TestHarness, SlabdeskError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| SlabdeskError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let sqlite = Arc::new(SqliteStore::open(storage.clone()).await?);
        let store = Arc::new(FlakyStore::new(sqlite.clone()));

        let mut config = SlabdeskConfig {
            storage,
            ..SlabdeskConfig::default()
        };
        config.server.allowed_origins.clear();
        if let Some(hours) = self.due_after_hours {
            config.follow_up.due_after_hours = hours;
        }
        if let Some(assignee) = self.default_assignee {
            config.follow_up.default_assignee = assignee;
        }
        if let Some(secs) = self.sweep_interval_secs {
            config.sweeper.interval_secs = secs;
        }
        if let Some((initial, max)) = self.retry_backoff_secs {
            config.sweeper.retry_backoff_secs = initial;
            config.sweeper.max_retry_backoff_secs = max;
        }

        Ok(TestHarness {
            store,
            sqlite,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A store on a temp SQLite database plus the config that describes it.
pub struct TestHarness {
    /// Failure-injecting view of the store. Hand this to the code under test.
    pub store: Arc<FlakyStore>,
    /// The underlying SQLite store, for assertions that bypass injected failures.
    pub sqlite: Arc<SqliteStore>,
    /// Configuration pointing at the temp database. CORS is permissive.
    pub config: SlabdeskConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A harness with default settings.
    pub async fn new() -> Result<Self, SlabdeskError> {
        Self::builder().build().await
    }

    /// The store as a trait object.
    pub fn record_store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }
}
