//! Handler for Slack Events API callbacks.
//!
//! Verifies the request signature, answers `url_verification` challenges and
//! hands `app_mention` events to the mention pipeline on a background task so
//! Slack gets its acknowledgement within the 3 second window.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use super::handler::AppState;
use super::helpers::{err_response, ok_empty, ok_json};
use super::parsing::{get_header_value, parse_mention, v_str};
use super::signature::verify_slack_signature;
use crate::features::spawn_mention;

pub async fn handle_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Ok(body) = std::str::from_utf8(&body) else {
        return err_response(StatusCode::BAD_REQUEST, "Invalid body encoding");
    };

    let Some(signature) = get_header_value(&headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return err_response(StatusCode::UNAUTHORIZED, "Missing X-Slack-Signature header");
    };
    let Some(timestamp) = get_header_value(&headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return err_response(
            StatusCode::UNAUTHORIZED,
            "Missing X-Slack-Request-Timestamp header",
        );
    };

    if !verify_slack_signature(body, timestamp, signature, &state.signing_secret) {
        error!("Slack signature verification failed");
        return err_response(StatusCode::UNAUTHORIZED, "Invalid Slack signature");
    }

    let payload: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Failed to parse event body as JSON");
            return err_response(StatusCode::BAD_REQUEST, &format!("Parse Error: {e}"));
        }
    };

    match v_str(&payload, &["type"]).unwrap_or("") {
        "url_verification" => {
            let challenge = v_str(&payload, &["challenge"]).unwrap_or("");
            ok_json(json!({ "challenge": challenge }))
        }
        "event_callback" => {
            dispatch_event(&state, payload.get("event").unwrap_or(&Value::Null));
            ok_empty()
        }
        other => {
            debug!(payload_type = %other, "Ignoring unsupported payload type");
            ok_empty()
        }
    }
}

fn dispatch_event(state: &AppState, event: &Value) {
    let event_type = v_str(event, &["type"]).unwrap_or("");
    if event_type != "app_mention" {
        debug!(event_type = %event_type, "Ignoring event");
        return;
    }

    // Ignore bot messages to avoid loops
    if event.get("bot_id").is_some() {
        return;
    }

    match parse_mention(event) {
        Ok(mention) => {
            info!(channel = %mention.channel_id, ts = %mention.ts, "Received app_mention");
            spawn_mention(state.mentions.clone(), mention);
        }
        Err(e) => error!(error = %e, "Dropping malformed app_mention"),
    }
}
