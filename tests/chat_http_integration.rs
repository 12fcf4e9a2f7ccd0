//! Integration tests for chat HTTP endpoints.
//!
//! These tests drive the full router (routes, extractors, DTOs, error
//! mapping and middleware) in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use chat_matchmaker::adapters::{build_router, ChatHandlers, UnknownGeoResolver};
use chat_matchmaker::application::MatchmakingCoordinator;
use chat_matchmaker::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(server: &ServerConfig, max_message_length: Option<usize>) -> Router {
    let coordinator = Arc::new(MatchmakingCoordinator::new(Arc::new(UnknownGeoResolver)));
    let handlers = ChatHandlers::new(coordinator).with_max_message_length(max_message_length);
    build_router(handlers, server)
}

fn app() -> Router {
    app_with(&ServerConfig::default(), None)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn connect(app: &Router, id: u64, tags: Value) -> Value {
    let (status, body) = call(app, "POST", &format!("/connect/{id}"), Some(json!({ "tags": tags }))).await;
    assert_eq!(status, StatusCode::OK);
    body
}

// =============================================================================
// End-to-end flow
// =============================================================================

#[tokio::test]
async fn full_chat_session_over_http() {
    let app = app();

    assert_eq!(connect(&app, 1, json!([])).await, json!({"status": "waiting"}));
    assert_eq!(
        connect(&app, 2, json!(["x"])).await,
        json!({"status": "connected", "partner_id": 1, "tags": []})
    );

    let (status, body) = call(&app, "POST", "/message/2", Some(json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "message_sent"}));

    let (status, body) = call(&app, "GET", "/poll/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "online_count": 2,
            "messages": [{"from": 2, "message": "hi"}],
            "status": "connected",
            "partner_id": 2
        })
    );

    let (status, body) = call(&app, "POST", "/disconnect/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "disconnected"}));

    let (_, body) = call(&app, "GET", "/poll/1", None).await;
    assert_eq!(
        body,
        json!({
            "online_count": 1,
            "messages": [{"type": "disconnected", "message": "Partner disconnected."}],
            "status": "disconnected",
            "partner_id": null
        })
    );
}

#[tokio::test]
async fn connect_without_body_tags_defaults_to_wildcard() {
    let app = app();
    let (status, body) = call(&app, "POST", "/connect/5", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "waiting"}));

    let body = connect(&app, 6, json!(["music"])).await;
    assert_eq!(body["status"], "connected");
    assert_eq!(body["partner_id"], 5);
}

#[tokio::test]
async fn common_tags_are_sorted_and_exclude_sentinel() {
    let app = app();
    connect(&app, 1, json!(["rust", "chess", "go", "isTrusted"])).await;

    let body = connect(&app, 2, json!(["go", "rust", "isTrusted"])).await;

    assert_eq!(
        body,
        json!({"status": "connected", "partner_id": 1, "tags": ["go", "rust"]})
    );
}

#[tokio::test]
async fn user_id_zero_is_accepted() {
    let app = app();
    assert_eq!(connect(&app, 0, json!([])).await, json!({"status": "waiting"}));

    let (status, body) = call(&app, "GET", "/poll/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "waiting");
}

// =============================================================================
// Idempotency and unknown users
// =============================================================================

#[tokio::test]
async fn second_connect_reports_already_connected() {
    let app = app();
    connect(&app, 1, json!([])).await;

    assert_eq!(
        connect(&app, 1, json!(["other"])).await,
        json!({"status": "already_connected"})
    );

    let (_, health) = call(&app, "GET", "/health", None).await;
    assert_eq!(health["online_count"], 1);
}

#[tokio::test]
async fn poll_for_unknown_user_is_not_found() {
    let app = app();
    let (status, body) = call(&app, "GET", "/poll/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_CONNECTED");
    assert_eq!(body["message"], "User not connected");
}

#[tokio::test]
async fn message_from_unknown_user_is_not_found() {
    let app = app();
    let (status, body) = call(&app, "POST", "/message/42", Some(json!({"message": "hi"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_CONNECTED");
}

#[tokio::test]
async fn message_while_waiting_is_bad_request() {
    let app = app();
    connect(&app, 1, json!([])).await;

    let (status, body) = call(&app, "POST", "/message/1", Some(json!({"message": "anyone?"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_PARTNER");
    assert_eq!(body["message"], "No partner connected");
}

#[tokio::test]
async fn disconnect_is_idempotent() {
    let app = app();
    connect(&app, 1, json!([])).await;

    let (_, first) = call(&app, "POST", "/disconnect/1", None).await;
    let (status, second) = call(&app, "POST", "/disconnect/1", None).await;

    assert_eq!(first, json!({"status": "disconnected"}));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, json!({"status": "not_connected"}));
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = app();
    let (status, _) = call(&app, "GET", "/poll/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Limits, health, static assets
// =============================================================================

#[tokio::test]
async fn overlong_message_is_rejected_before_delivery() {
    let app = app_with(&ServerConfig::default(), Some(5));
    connect(&app, 1, json!([])).await;
    connect(&app, 2, json!([])).await;

    let (status, body) = call(&app, "POST", "/message/1", Some(json!({"message": "too long"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (_, poll) = call(&app, "GET", "/poll/2", None).await;
    assert_eq!(poll["messages"], json!([]));
}

#[tokio::test]
async fn health_reports_online_count() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "online_count": 0}));

    connect(&app, 1, json!([])).await;
    connect(&app, 2, json!([])).await;

    let (_, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(body["online_count"], 2);
}

#[tokio::test]
async fn static_directory_is_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>chat</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('chat');").unwrap();

    let server = ServerConfig {
        static_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..Default::default()
    };
    let app = app_with(&server, None);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>chat</h1>");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/static/app.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // API routes still work alongside static assets.
    let (status, _) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
