// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Slabdesk.
//!
//! Exposes the estimate, task, and customer-interaction services as a JSON
//! API over axum. Request and response fields are camelCase.

pub mod handlers;
pub mod server;

pub use handlers::ApiError;
pub use server::{GatewayState, build_router, cors_layer, start_server};
