//! Request helpers for HTTP integration tests.

use crate::test_helpers::TestApp;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use rstest::fixture;
use serde_json::Value;
use tower::ServiceExt;

/// Provides a fresh application per test.
#[fixture]
pub fn app() -> TestApp {
    TestApp::new()
}

/// Sends one request and decodes the JSON reply.
///
/// # Errors
///
/// Returns an error if the request cannot be built or the body is not JSON.
pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), eyre::Report> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = smart_todo::api::router(app.state.clone())
        .oneshot(request)
        .await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// Sends a `GET`.
///
/// # Errors
///
/// Returns an error if the exchange fails.
pub async fn get(app: &TestApp, uri: &str) -> Result<(StatusCode, Value), eyre::Report> {
    send(app, Method::GET, uri, None).await
}

/// Sends a `POST` with a JSON body.
///
/// # Errors
///
/// Returns an error if the exchange fails.
pub async fn post(
    app: &TestApp,
    uri: &str,
    body: Value,
) -> Result<(StatusCode, Value), eyre::Report> {
    send(app, Method::POST, uri, Some(body)).await
}

/// Sends a `PUT` with a JSON body.
///
/// # Errors
///
/// Returns an error if the exchange fails.
pub async fn put(
    app: &TestApp,
    uri: &str,
    body: Value,
) -> Result<(StatusCode, Value), eyre::Report> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Sends a `DELETE`.
///
/// # Errors
///
/// Returns an error if the exchange fails.
pub async fn delete(app: &TestApp, uri: &str) -> Result<(StatusCode, Value), eyre::Report> {
    send(app, Method::DELETE, uri, None).await
}

/// Creates a manual task and returns its identifier.
///
/// # Errors
///
/// Returns an error if creation does not succeed.
pub async fn create_task(
    app: &TestApp,
    title: &str,
    priority: i64,
) -> Result<i64, eyre::Report> {
    let (status, body) = post(
        app,
        "/tasks",
        serde_json::json!({ "userId": 1, "title": title, "priority": priority }),
    )
    .await?;
    eyre::ensure!(status == StatusCode::CREATED, "create failed: {body}");
    body["task"]["id"]
        .as_i64()
        .ok_or_else(|| eyre::eyre!("missing task id in {body}"))
}

/// Returns `error.kind` and `error.field` of an error body.
pub fn error_parts(body: &Value) -> (Option<&str>, Option<&str>) {
    (
        body["error"]["kind"].as_str(),
        body["error"]["field"].as_str(),
    )
}
