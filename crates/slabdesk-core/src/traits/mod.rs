// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the lifecycle services and their collaborators.
//!
//! Traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod store;

pub use store::RecordStore;
