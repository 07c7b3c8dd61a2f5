// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-writer model.
//!
//! Every read and write in slabdesk-storage runs as a closure on
//! `tokio-rusqlite`'s one background thread, so closures never interleave.
//! Query functions take `&Database` and call `database.connection().call()`.
//!
//! A read-then-write that must be atomic (the status comparison in
//! [`update_estimate`](crate::queries::estimates::update_estimate), the
//! existence check in [`create_task`](crate::queries::tasks::create_task))
//! is done inside one closure and one transaction.
//!
//! **Do NOT create additional Connection instances for writes.**
