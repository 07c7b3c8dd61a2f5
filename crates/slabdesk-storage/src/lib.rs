// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Slabdesk.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed CRUD operations for
//! estimates, tasks, and the customer interaction log.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod writer;

pub use adapter::SqliteStore;
pub use database::Database;
