// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Slabdesk integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - temp SQLite store plus matching configuration
//! - [`FlakyStore`] - store wrapper with per-operation failure injection
//! - [`fixtures`] - sample estimate and task payloads

pub mod fixtures;
pub mod flaky_store;
pub mod harness;

pub use flaky_store::{FlakyStore, StoreOp};
pub use harness::TestHarness;
