//! User and health endpoint tests.

use super::helpers::{app, error_parts, get, post};
use crate::test_helpers::TestApp;
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok(app: TestApp) {
    let (status, body) = get(&app, "/health").await.expect("request should complete");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_can_be_found_by_email(app: TestApp) {
    let (status, created) = post(
        &app,
        "/users",
        json!({ "email": "ada@example.com", "name": "Ada" }),
    )
    .await
    .expect("request should complete");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user"]["name"], "Ada");

    let (found_status, found) = get(&app, "/users?email=ada@example.com")
        .await
        .expect("request should complete");
    assert_eq!(found_status, StatusCode::OK);
    assert_eq!(found["user"]["id"], created["user"]["id"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_conflicts(app: TestApp) {
    let payload = json!({ "email": "ada@example.com", "name": "Ada" });
    post(&app, "/users", payload.clone())
        .await
        .expect("request should complete");

    let (status, body) = post(&app, "/users", payload)
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_parts(&body).0, Some("unique_constraint_violation"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_email_is_not_found(app: TestApp) {
    let (status, body) = get(&app, "/users?email=nobody@example.com")
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_parts(&body).0, Some("not_found"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_email_is_rejected(app: TestApp) {
    let (status, body) = post(&app, "/users", json!({ "email": "not-an-email", "name": "Ada" }))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_parts(&body), (Some("validation_error"), Some("email")));
}
