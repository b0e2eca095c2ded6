//! Recommendation and workload analysis endpoint tests.

use super::helpers::{app, create_task, error_parts, post};
use crate::test_helpers::TestApp;
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

async fn note(app: &TestApp, content: &str) {
    let (status, _) = post(
        app,
        "/context",
        json!({ "userId": 1, "content": content, "entryType": "note" }),
    )
    .await
    .expect("request should complete");
    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recommendations_without_context_skip_the_assistant(app: TestApp) {
    create_task(&app, "Pay rent", 1).await.expect("task");

    let (status, body) = post(&app, "/ai/recommendations", json!({ "userId": 1 }))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "recommendations": [] }));
    assert_eq!(app.assistant.call_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recommendations_drop_existing_titles(app: TestApp) {
    create_task(&app, "Buy milk", 3).await.expect("task");
    note(&app, "Offsite next month, nothing booked yet").await;
    app.assistant.push_reply(json!({
        "recommendations": [
            {
                "title": "buy MILK ",
                "description": "Fridge is empty.",
                "priority": 3,
                "reasoning": "Mentioned twice.",
                "contextTags": ["home"]
            },
            {
                "title": "Book offsite venue",
                "description": "Shortlist three venues.",
                "priority": 2,
                "reasoning": "Nothing is booked yet.",
                "contextTags": ["work"]
            }
        ]
    }));

    let (status, body) = post(&app, "/ai/recommendations", json!({ "userId": 1 }))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::OK);
    let recommendations = body["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 1);
    let first = recommendations.first().expect("one recommendation");
    assert_eq!(first["title"], "Book offsite venue");
    assert_eq!(first["priority"], 2);
    assert_eq!(first["contextTags"], json!(["work"]));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_recommendations_are_a_gateway_error(app: TestApp) {
    note(&app, "Offsite next month").await;
    app.assistant.push_reply(json!({ "ideas": ["anything"] }));

    let (status, body) = post(&app, "/ai/recommendations", json!({ "userId": 1 }))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(error_parts(&body).0, Some("ai_service_error"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_of_nothing_is_null(app: TestApp) {
    let (status, body) = post(&app, "/ai/analyze", json!({ "userId": 1 }))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "analysis": Value::Null }));
    assert_eq!(app.assistant.call_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_returns_the_assessment(app: TestApp) {
    create_task(&app, "Pay invoice", 1).await.expect("task");
    app.assistant.push_reply(json!({
        "workloadAssessment": "Light week with one urgent item.",
        "priorityDistribution": "One high priority task.",
        "schedulingInsights": "Pay the invoice first thing tomorrow.",
        "managementSuggestions": ["Batch admin work", "Block focus time"]
    }));

    let (status, body) = post(&app, "/ai/analyze", json!({ "userId": 1 }))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::OK);
    let analysis = &body["analysis"];
    assert_eq!(analysis["workloadAssessment"], "Light week with one urgent item.");
    assert_eq!(
        analysis["managementSuggestions"],
        json!(["Batch admin work", "Block focus time"])
    );
    assert_eq!(app.assistant.call_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insight_routes_require_an_owner(app: TestApp) {
    let (status, body) = post(&app, "/ai/analyze", json!({}))
        .await
        .expect("request should complete");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_parts(&body), (Some("validation_error"), Some("userId")));
}
