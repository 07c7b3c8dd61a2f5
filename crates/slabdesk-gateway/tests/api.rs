// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process HTTP tests driving the router with `oneshot`.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Value, json};
use slabdesk_gateway::{GatewayState, build_router};
use slabdesk_test_utils::{StoreOp, TestHarness};
use slabdesk_workflow::Services;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    services: Services,
    harness: TestHarness,
}

impl TestApp {
    async fn new() -> Self {
        let harness = TestHarness::new().await.unwrap();
        let services = Services::new(harness.record_store(), harness.config.follow_up.clone());
        let router = build_router(
            GatewayState {
                services: services.clone(),
            },
            &harness.config.server,
        );
        Self {
            router,
            services,
            harness,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };
        self.send_request(request.body(body).unwrap()).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn drain_follow_ups(&self) {
        assert!(self.services.follow_up.drain(Duration::from_secs(5)).await);
    }
}

fn quartz(status: &str) -> Value {
    json!({
        "material": "Quartz",
        "length": 96,
        "width": 26,
        "thickness": 1.5,
        "edgeFinish": "Bullnose",
        "materialCost": 800,
        "edgeFinishCost": 50,
        "laborCost": 200,
        "taxRate": 0.08,
        "discount": 0,
        "cost": 1050,
        "status": status
    })
}

#[tokio::test]
async fn quartz_estimate_sent_schedules_follow_up() {
    let app = TestApp::new().await;

    let (status, created) = app
        .send(Method::POST, "/estimates", Some(quartz("Draft")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["material"], "Quartz");
    assert_eq!(created["edgeFinish"], "Bullnose");

    let (status, updated) = app
        .send(Method::PUT, "/estimates/1", Some(quartz("Sent")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Sent");
    assert_eq!(updated["id"], 1);

    app.drain_follow_ups().await;

    let (status, tasks) = app.send(Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["estimateId"], 1);
    assert_eq!(tasks[0]["assignedTo"], "Unassigned");
    assert_eq!(tasks[0]["completed"], false);
    let due: DateTime<Utc> = tasks[0]["dueDate"].as_str().unwrap().parse().unwrap();
    let expected = Utc::now() + TimeDelta::hours(24);
    assert!((due - expected).num_seconds().abs() < 60);

    let (status, interactions) = app.send(Method::GET, "/customer-interactions", None).await;
    assert_eq!(status, StatusCode::OK);
    let interactions = interactions.as_array().unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0]["estimateId"], 1);
    assert_eq!(interactions[0]["interactionType"], "Reminder Created");
}

#[tokio::test]
async fn delete_nonexistent_estimate_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::DELETE, "/estimates/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "estimate 999 not found");
}

#[tokio::test]
async fn delete_existing_estimate_cascades() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/estimates", Some(quartz("Sent")))
        .await;
    app.drain_follow_ups().await;

    let (status, body) = app.send(Method::DELETE, "/estimates/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Deleted successfully"}));

    let (_, tasks) = app.send(Method::GET, "/tasks", None).await;
    assert_eq!(tasks, json!([]));
    let (_, interactions) = app.send(Method::GET, "/customer-interactions", None).await;
    assert_eq!(interactions, json!([]));
    let (status, _) = app.send(Method::GET, "/estimates/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_estimate_is_rejected_and_not_stored() {
    let app = TestApp::new().await;
    let mut payload = quartz("Draft");
    payload["cost"] = json!(0);

    let (status, body) = app.send(Method::POST, "/estimates", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cost"));

    let (_, list) = app.send(Method::GET, "/estimates", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn missing_fields_are_a_validation_error() {
    let app = TestApp::new().await;
    let (status, _) = app
        .send(Method::POST, "/estimates", Some(json!({"material": "Quartz"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/estimates")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/estimates/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ID format");

    let (status, _) = app
        .send(
            Method::PUT,
            "/tasks/x/update",
            Some(json!({"completed": true})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_and_list_estimates() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/estimates", Some(quartz("Draft")))
        .await;
    app.send(Method::POST, "/estimates", Some(quartz("Accepted")))
        .await;

    let (status, one) = app.send(Method::GET, "/estimates/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["status"], "Accepted");

    let (status, all) = app.send(Method::GET, "/estimates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_missing_estimate_is_404() {
    let app = TestApp::new().await;
    let (status, _) = app
        .send(Method::PUT, "/estimates/42", Some(quartz("Sent")))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    app.drain_follow_ups().await;
    let (_, tasks) = app.send(Method::GET, "/tasks", None).await;
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn task_endpoints() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/estimates", Some(quartz("Draft")))
        .await;

    let (status, task) = app
        .send(
            Method::POST,
            "/tasks",
            Some(json!({
                "estimateId": 1,
                "assignedTo": "Dana",
                "dueDate": "2026-03-01T09:00:00Z",
                "completed": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["id"], 1);
    assert_eq!(task["assignedTo"], "Dana");

    let (status, body) = app
        .send(Method::PUT, "/tasks/1/update", Some(json!({"completed": true})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully");

    let (status, body) = app
        .send(Method::PUT, "/tasks/1/assign", Some(json!({"assignedTo": "Sam"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task assigned successfully");

    let (_, tasks) = app.send(Method::GET, "/tasks", None).await;
    assert_eq!(tasks[0]["completed"], true);
    assert_eq!(tasks[0]["assignedTo"], "Sam");
}

#[tokio::test]
async fn task_errors() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/tasks",
            Some(json!({
                "estimateId": 7,
                "assignedTo": "Dana",
                "dueDate": "2026-03-01T09:00:00Z"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.send(Method::POST, "/estimates", Some(quartz("Draft")))
        .await;
    let (status, _) = app
        .send(
            Method::POST,
            "/tasks",
            Some(json!({
                "estimateId": 1,
                "assignedTo": "Dana",
                "dueDate": "+10000-01-01T00:00:00Z"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, tasks) = app.send(Method::GET, "/tasks", None).await;
    assert_eq!(tasks, json!([]));

    let (status, _) = app
        .send(Method::PUT, "/tasks/5/update", Some(json!({"completed": true})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PUT, "/tasks/5/assign", Some(json!({"assignedTo": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::PUT, "/tasks/5/update", Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_is_generic_500() {
    let app = TestApp::new().await;
    app.harness.store.fail(StoreOp::ListTasks).await;

    let (status, body) = app.send(Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
}

#[tokio::test]
async fn follow_up_failure_does_not_affect_update_response() {
    let app = TestApp::new().await;
    app.send(Method::POST, "/estimates", Some(quartz("Draft")))
        .await;
    app.harness.store.fail(StoreOp::CreateTask).await;

    let (status, _) = app
        .send(Method::PUT, "/estimates/1", Some(quartz("Sent")))
        .await;
    assert_eq!(status, StatusCode::OK);
    app.drain_follow_ups().await;

    let (_, interactions) = app.send(Method::GET, "/customer-interactions", None).await;
    assert_eq!(interactions, json!([]));
}

#[tokio::test]
async fn health_reflects_store() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());

    app.harness.store.fail(StoreOp::HealthCheck).await;
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn cors_allows_configured_origin_with_credentials() {
    let harness = TestHarness::new().await.unwrap();
    let services = Services::new(harness.record_store(), harness.config.follow_up.clone());
    let mut server = harness.config.server.clone();
    server.allowed_origins = vec!["http://localhost:3000".to_string()];
    let router = build_router(GatewayState { services }, &server);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/estimates")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
