// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use slabdesk_core::SlabdeskError;
use tracing::info;

use crate::migrations;

/// Storage format for every timestamp column.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Handle to the Slabdesk SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and apply pending migrations.
    ///
    /// Enables foreign keys so estimate deletion cascades, and WAL journaling
    /// when `wal_mode` is set.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, SlabdeskError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SlabdeskError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| SlabdeskError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| -> Result<(), SlabdeskError> {
            apply_pragmas(conn, wal_mode).map_err(|e| SlabdeskError::Storage {
                source: Box::new(e),
            })?;
            migrations::run_migrations(conn)
        })
        .await
        .map_err(|e| match e {
            tokio_rusqlite::Error::Error(inner) => inner,
            other => SlabdeskError::Storage {
                source: other.to_string().into(),
            },
        })?;

        info!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The single writer connection. Query modules go through `call()` on it.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Fold the WAL back into the main database file.
    pub async fn checkpoint(&self) -> Result<(), SlabdeskError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

fn apply_pragmas(conn: &rusqlite::Connection, wal_mode: bool) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    if wal_mode {
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
    }
    Ok(())
}

/// Map tokio-rusqlite errors onto the storage error variant.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SlabdeskError {
    SlabdeskError::Storage {
        source: Box::new(e),
    }
}

/// Render a timestamp in the fixed-width storage format.
pub(crate) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Read a timestamp column written by [`format_timestamp`] or SQLite's `strftime`.
pub(crate) fn timestamp_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> Result<DateTime<Utc>, rusqlite::Error> {
    let text: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
