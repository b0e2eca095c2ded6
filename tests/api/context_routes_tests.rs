//! Context endpoint tests.

use super::helpers::{app, error_parts, get, post};
use crate::test_helpers::TestApp;
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

async fn record(app: &TestApp, content: &str, entry_date: &str) -> Value {
    let (status, body) = post(
        app,
        "/context",
        json!({
            "userId": 1,
            "content": content,
            "entryType": "note",
            "entryDate": entry_date
        }),
    )
    .await
    .expect("request should complete");
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn contents(body: &Value) -> Vec<&str> {
    body["contextEntries"]
        .as_array()
        .expect("entry array")
        .iter()
        .filter_map(|entry| entry["content"].as_str())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entry_date_defaults_to_today(app: TestApp) {
    let (status, body) = post(
        &app,
        "/context",
        json!({ "userId": 1, "content": "Standup moved to 10am", "entryType": "message" }),
    )
    .await
    .expect("request should complete");

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["contextEntry"]["entryDate"], "2024-01-03");
    assert_eq!(body["contextEntry"]["entryType"], "message");
}

#[rstest]
#[case(json!({ "userId": 1, "entryType": "note" }), "content")]
#[case(json!({ "userId": 1, "content": "Lunch?" }), "entryType")]
#[case(json!({ "userId": 1, "content": "Lunch?", "entryType": "tweet" }), "entryType")]
#[case(
    json!({ "userId": 1, "content": "Lunch?", "entryType": "note", "entryDate": "03/01/2024" }),
    "entryDate"
)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_entries_name_the_field(
    app: TestApp,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let (status, body) = post(&app, "/context", payload)
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_parts(&body), (Some("validation_error"), Some(field)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_keeps_the_trailing_week_newest_first(app: TestApp) {
    record(&app, "Ten days ago", "2023-12-24").await;
    record(&app, "Today", "2024-01-03").await;
    record(&app, "Three days ago", "2023-12-31").await;

    let (status, body) = get(&app, "/context?userId=1&days=7")
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(contents(&body), vec!["Today", "Three days ago"]);

    let (_, widened) = get(&app, "/context?userId=1&days=30")
        .await
        .expect("request should complete");
    assert_eq!(
        contents(&widened),
        vec!["Today", "Three days ago", "Ten days ago"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn zero_day_window_returns_only_today(app: TestApp) {
    record(&app, "Yesterday", "2024-01-02").await;
    record(&app, "Today", "2024-01-03").await;

    let (_, body) = get(&app, "/context?userId=1&days=0")
        .await
        .expect("request should complete");

    assert_eq!(contents(&body), vec!["Today"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn negative_window_is_rejected(app: TestApp) {
    let (status, body) = get(&app, "/context?userId=1&days=-1")
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_parts(&body), (Some("validation_error"), Some("days")));
}
