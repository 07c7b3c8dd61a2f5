// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary and applied
//! on every [`Database::open`](crate::Database::open).

use slabdesk_core::SlabdeskError;
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), SlabdeskError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| SlabdeskError::Storage {
            source: Box::new(e),
        })?;
    for migration in report.applied_migrations() {
        debug!(migration = %migration, "applied migration");
    }
    Ok(())
}
