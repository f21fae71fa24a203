mod common;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use linksum::errors::SlackError;
use linksum::slack::SlackClient;
use serde_json::{Value, json};
use std::collections::HashMap;

async fn replies(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer xoxb-test") {
        return (
            StatusCode::OK,
            Json(json!({ "ok": false, "error": "invalid_auth" })),
        );
    }

    let body = match query.get("ts").map(String::as_str) {
        Some("1.0") => json!({
            "ok": true,
            "messages": [
                { "type": "message", "text": "<https://example.com/story>", "ts": "1.0" },
                { "type": "message", "text": "a reply", "ts": "1.1" }
            ]
        }),
        Some("2.0") => json!({ "ok": true, "messages": [] }),
        Some("3.0") => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
        }
        _ => json!({ "ok": false, "error": "thread_not_found" }),
    };
    (StatusCode::OK, Json(body))
}

async fn client(token: &str) -> SlackClient {
    let app = Router::new().route("/conversations.replies", get(replies));
    let base = common::spawn_server(app).await;
    SlackClient::new(token.to_string(), base).expect("build Slack client")
}

#[tokio::test]
async fn test_parent_text_is_first_message() {
    let slack = client("xoxb-test").await;
    let text = slack.get_thread_parent_text("C123", "1.0").await.unwrap();
    assert_eq!(text, "<https://example.com/story>");
}

#[tokio::test]
async fn test_not_ok_is_api_error() {
    let slack = client("xoxb-test").await;
    let err = slack
        .get_thread_parent_text("C123", "9.9")
        .await
        .unwrap_err();
    match err {
        SlackError::ApiError(msg) => assert!(msg.contains("thread_not_found"), "got: {msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_token_is_api_error() {
    let slack = client("xoxb-wrong").await;
    let err = slack
        .get_thread_parent_text("C123", "1.0")
        .await
        .unwrap_err();
    assert!(matches!(err, SlackError::ApiError(msg) if msg.contains("invalid_auth")));
}

#[tokio::test]
async fn test_empty_thread_is_missing_parent() {
    let slack = client("xoxb-test").await;
    let err = slack
        .get_thread_parent_text("C123", "2.0")
        .await
        .unwrap_err();
    assert!(matches!(err, SlackError::MissingParent));
}

#[tokio::test]
async fn test_server_error_status_is_api_error() {
    let slack = client("xoxb-test").await;
    let err = slack
        .get_thread_parent_text("C123", "3.0")
        .await
        .unwrap_err();
    assert!(matches!(err, SlackError::ApiError(msg) if msg.contains("500")));
}
