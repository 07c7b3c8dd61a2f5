// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Slabdesk.
//!
//! This crate provides the domain records (estimates, tasks, customer
//! interactions), their validation rules, the shared error type, and the
//! [`RecordStore`] trait every persistence backend implements.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::SlabdeskError;
pub use traits::RecordStore;
pub use types::{
    CustomerInteraction, Estimate, EstimateDraft, EstimateUpdate, HealthStatus, InteractionKind,
    NewInteraction, NewTask, STATUS_SENT, Task,
};
