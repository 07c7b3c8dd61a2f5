// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`RecordStore`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use slabdesk_config::model::StorageConfig;
use slabdesk_core::{
    CustomerInteraction, Estimate, EstimateDraft, EstimateUpdate, HealthStatus, NewInteraction,
    NewTask, RecordStore, SlabdeskError, Task,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// The database is opened by [`SqliteStore::open`] or lazily by
/// [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a store for the given configuration without opening the database.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create the store and open its database, running migrations.
    pub async fn open(config: StorageConfig) -> Result<Self, SlabdeskError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    /// Open the database. Fails if it is already open.
    pub async fn initialize(&self) -> Result<(), SlabdeskError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SlabdeskError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL so the database file is self-contained after exit.
    pub async fn close(&self) -> Result<(), SlabdeskError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    fn db(&self) -> Result<&Database, SlabdeskError> {
        self.db.get().ok_or_else(|| SlabdeskError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn create_estimate(&self, draft: &EstimateDraft) -> Result<Estimate, SlabdeskError> {
        queries::estimates::create_estimate(self.db()?, draft).await
    }

    async fn get_estimate(&self, id: i64) -> Result<Option<Estimate>, SlabdeskError> {
        queries::estimates::get_estimate(self.db()?, id).await
    }

    async fn list_estimates(&self) -> Result<Vec<Estimate>, SlabdeskError> {
        queries::estimates::list_estimates(self.db()?).await
    }

    async fn update_estimate(
        &self,
        id: i64,
        draft: &EstimateDraft,
    ) -> Result<Option<EstimateUpdate>, SlabdeskError> {
        queries::estimates::update_estimate(self.db()?, id, draft).await
    }

    async fn estimate_exists(&self, id: i64) -> Result<bool, SlabdeskError> {
        queries::estimates::estimate_exists(self.db()?, id).await
    }

    async fn delete_estimate(&self, id: i64) -> Result<bool, SlabdeskError> {
        queries::estimates::delete_estimate(self.db()?, id).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Option<Task>, SlabdeskError> {
        queries::tasks::create_task(self.db()?, task).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, SlabdeskError> {
        queries::tasks::list_tasks(self.db()?).await
    }

    async fn set_task_completed(&self, id: i64, completed: bool) -> Result<bool, SlabdeskError> {
        queries::tasks::set_task_completed(self.db()?, id, completed).await
    }

    async fn assign_task(&self, id: i64, assignee: &str) -> Result<bool, SlabdeskError> {
        queries::tasks::assign_task(self.db()?, id, assignee).await
    }

    async fn list_overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, SlabdeskError> {
        queries::tasks::list_overdue_tasks(self.db()?, now).await
    }

    async fn log_interaction(
        &self,
        interaction: &NewInteraction,
    ) -> Result<CustomerInteraction, SlabdeskError> {
        queries::interactions::log_interaction(self.db()?, interaction).await
    }

    async fn list_interactions(&self) -> Result<Vec<CustomerInteraction>, SlabdeskError> {
        queries::interactions::list_interactions(self.db()?).await
    }

    async fn health_check(&self) -> Result<HealthStatus, SlabdeskError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("database not open".to_string()));
        };
        let probe = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        Ok(match probe {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabdesk_core::InteractionKind;
    use tempfile::tempdir;

    fn config_in(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join("store.db").to_string_lossy().to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn uninitialized_store_errors() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(config_in(&dir));
        assert!(store.list_estimates().await.is_err());
        assert_eq!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy("database not open".to_string())
        );
    }

    #[tokio::test]
    async fn double_initialize_fails() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(config_in(&dir)).await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn store_round_trip_through_trait() {
        let dir = tempdir().unwrap();
        let store: Box<dyn RecordStore> = Box::new(SqliteStore::open(config_in(&dir)).await.unwrap());
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);

        let draft = EstimateDraft {
            material: "Marble".into(),
            length: 60.0,
            width: 25.0,
            thickness: 2.0,
            edge_finish: "Ogee".into(),
            cost: 900.0,
            status: "Draft".into(),
            ..Default::default()
        };
        let estimate = store.create_estimate(&draft).await.unwrap();
        let task = store
            .create_task(&NewTask {
                estimate_id: estimate.id,
                assigned_to: "Lee".into(),
                due_date: Some(Utc::now() - chrono::Duration::minutes(5)),
                completed: false,
            })
            .await
            .unwrap()
            .unwrap();
        store
            .log_interaction(&NewInteraction::of_kind(
                estimate.id,
                InteractionKind::ReminderSent,
                Utc::now(),
            ))
            .await
            .unwrap();

        let overdue = store.list_overdue_tasks(Utc::now()).await.unwrap();
        assert_eq!(overdue, vec![task]);
        assert_eq!(store.list_interactions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn close_checkpoints_wal() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(config_in(&dir)).await.unwrap();
        store.create_estimate(&EstimateDraft::default()).await.unwrap();
        store.close().await.unwrap();
    }
}
