// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, put},
};
use slabdesk_config::model::ServerConfig;
use slabdesk_core::SlabdeskError;
use slabdesk_workflow::Services;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub services: Services,
}

/// Build the CORS layer for the configured frontend origins.
///
/// An empty list allows any origin without credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Build the API router.
///
/// Routes:
/// - POST, GET /estimates
/// - GET, PUT, DELETE /estimates/{id}
/// - POST, GET /tasks
/// - PUT /tasks/{id}/update
/// - PUT /tasks/{id}/assign
/// - GET /customer-interactions
/// - GET /health
pub fn build_router(state: GatewayState, config: &ServerConfig) -> Router {
    Router::new()
        .route(
            "/estimates",
            get(handlers::list_estimates).post(handlers::create_estimate),
        )
        .route(
            "/estimates/{id}",
            get(handlers::get_estimate)
                .put(handlers::update_estimate)
                .delete(handlers::delete_estimate),
        )
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/tasks/{id}/update", put(handlers::update_task_completion))
        .route("/tasks/{id}/assign", put(handlers::assign_task))
        .route("/customer-interactions", get(handlers::list_interactions))
        .route("/health", get(handlers::get_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origins)),
        )
        .with_state(state)
}

/// Serve the API until `cancel` fires.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn start_server(
    config: &ServerConfig,
    services: Services,
    cancel: CancellationToken,
) -> Result<(), SlabdeskError> {
    let app = build_router(GatewayState { services }, config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SlabdeskError::Internal(format!("failed to bind server to {addr}: {e}")))?;

    info!("server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| SlabdeskError::Internal(format!("server error: {e}")))?;

    info!("server stopped");
    Ok(())
}
