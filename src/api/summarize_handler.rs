//! `POST /summarize`: the summarizer without the Slack round trip.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::handler::AppState;
use super::helpers::{err_response, ok_json};

pub const ARTICLE_REQUIRED: &str = "Article content is required";

#[derive(Debug, Deserialize)]
struct SummarizeRequest {
    article: Option<String>,
}

/// Responds `200 {"summary": ...}` whether or not the summarizer succeeded;
/// only a missing article is an error.
pub async fn handle_summarize(State(state): State<AppState>, body: Bytes) -> Response {
    let article = match serde_json::from_slice::<SummarizeRequest>(&body) {
        Ok(SummarizeRequest {
            article: Some(article),
        }) if !article.trim().is_empty() => article,
        Ok(_) => return err_response(StatusCode::BAD_REQUEST, ARTICLE_REQUIRED),
        Err(e) => {
            warn!(error = %e, "Rejecting malformed summarize request");
            return err_response(StatusCode::BAD_REQUEST, ARTICLE_REQUIRED);
        }
    };

    info!(chars = article.chars().count(), "Summarize request");
    let summary = state
        .summarizer
        .summarize(&article)
        .await
        .unwrap_or_else(|e| e.to_string());

    ok_json(json!({ "summary": summary }))
}
