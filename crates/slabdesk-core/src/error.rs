// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Slabdesk.

use thiserror::Error;

/// The primary error type used across the store trait and lifecycle operations.
#[derive(Debug, Error)]
pub enum SlabdeskError {
    /// Configuration errors surfaced at runtime (bad listener address, etc.).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (connection, constraint violation, row decoding).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Caller-supplied input is malformed or out of range.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SlabdeskError {
    /// Shorthand for a missing estimate.
    pub fn estimate_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "estimate",
            id,
        }
    }

    /// Shorthand for a missing task.
    pub fn task_not_found(id: i64) -> Self {
        Self::NotFound { entity: "task", id }
    }

    /// Whether the error was caused by the caller rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}
