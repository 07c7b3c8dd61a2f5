// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Slabdesk REST API.
//!
//! Handlers take their body and path extractors as `Result`s so that every
//! malformed request is answered with a 400 and the standard error body.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use slabdesk_core::{
    CustomerInteraction, Estimate, EstimateDraft, HealthStatus, NewTask, SlabdeskError, Task,
};
use tracing::{debug, error};

use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Confirmation body for mutations that return no record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" or "unavailable".
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Request body for PUT /tasks/{id}/update.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub completed: bool,
}

/// Request body for PUT /tasks/{id}/assign.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub assigned_to: String,
}

/// A failed request, rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be parsed.
    BadRequest(String),
    /// A domain or store error from the services.
    Service(SlabdeskError),
}

impl From<SlabdeskError> for ApiError {
    fn from(e: SlabdeskError) -> Self {
        Self::Service(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(rejection = %rejection.body_text(), "rejected path parameter");
        Self::BadRequest("Invalid ID format".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Service(e @ SlabdeskError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::Service(e @ SlabdeskError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            // Store and internal detail stays in the server log.
            Self::Service(e) => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// POST /estimates
pub async fn create_estimate(
    State(state): State<GatewayState>,
    body: Result<Json<EstimateDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Estimate>)> {
    let Json(draft) = body?;
    let estimate = state.services.estimates.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(estimate)))
}

/// GET /estimates
pub async fn list_estimates(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Estimate>>> {
    Ok(Json(state.services.estimates.list().await?))
}

/// GET /estimates/{id}
pub async fn get_estimate(
    State(state): State<GatewayState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Estimate>> {
    let Path(id) = id?;
    Ok(Json(state.services.estimates.get(id).await?))
}

/// PUT /estimates/{id}
///
/// Replaces every field. A move into "Sent" schedules the follow-up task
/// without delaying the response.
pub async fn update_estimate(
    State(state): State<GatewayState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<EstimateDraft>, JsonRejection>,
) -> ApiResult<Json<Estimate>> {
    let Path(id) = id?;
    let Json(draft) = body?;
    Ok(Json(state.services.estimates.update(id, &draft).await?))
}

/// DELETE /estimates/{id}
pub async fn delete_estimate(
    State(state): State<GatewayState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.services.estimates.delete(id).await?;
    Ok(MessageResponse::new("Deleted successfully"))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<GatewayState>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(task) = body?;
    let task = state.services.tasks.create(&task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks
pub async fn list_tasks(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.services.tasks.list().await?))
}

/// PUT /tasks/{id}/update
pub async fn update_task_completion(
    State(state): State<GatewayState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CompletionRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(body) = body?;
    state.services.tasks.set_completed(id, body.completed).await?;
    Ok(MessageResponse::new("Task updated successfully"))
}

/// PUT /tasks/{id}/assign
pub async fn assign_task(
    State(state): State<GatewayState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AssignRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(body) = body?;
    state.services.tasks.assign(id, &body.assigned_to).await?;
    Ok(MessageResponse::new("Task assigned successfully"))
}

/// GET /customer-interactions
pub async fn list_interactions(
    State(state): State<GatewayState>,
) -> ApiResult<Json<Vec<CustomerInteraction>>> {
    Ok(Json(state.services.interactions.list().await?))
}

/// GET /health
///
/// Answers 503 when the store does not complete a round-trip.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let version = env!("CARGO_PKG_VERSION").to_string();
    match state.services.health().await {
        HealthStatus::Healthy => Json(HealthResponse {
            status: "ok".to_string(),
            version,
        })
        .into_response(),
        HealthStatus::Unhealthy(reason) => {
            error!(reason = %reason, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    version,
                }),
            )
                .into_response()
        }
    }
}
