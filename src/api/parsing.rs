use axum::http::HeaderMap;
use serde_json::Value;

use crate::core::models::InboundMention;
use crate::errors::SlackError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Build an [`InboundMention`] from the `event` object of an `app_mention` callback.
///
/// # Errors
///
/// Returns `SlackError::ParseError` if `ts` or `channel` is missing.
pub fn parse_mention(event: &Value) -> Result<InboundMention, SlackError> {
    let ts = v_str(event, &["ts"])
        .ok_or_else(|| SlackError::ParseError("app_mention without ts".to_string()))?;
    let channel = v_str(event, &["channel"])
        .ok_or_else(|| SlackError::ParseError("app_mention without channel".to_string()))?;

    Ok(InboundMention {
        text: v_str(event, &["text"]).unwrap_or_default().to_string(),
        thread_ts: v_str(event, &["thread_ts"]).map(str::to_string),
        ts: ts.to_string(),
        channel_id: channel.to_string(),
        user_id: v_str(event, &["user"]).unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_threaded_mention() {
        let event = json!({
            "type": "app_mention",
            "text": "<@U0BOT> summarize",
            "ts": "1700000001.000200",
            "thread_ts": "1700000000.000100",
            "channel": "C123",
            "user": "U456"
        });
        let mention = parse_mention(&event).unwrap();
        assert_eq!(mention.thread_ts.as_deref(), Some("1700000000.000100"));
        assert_eq!(mention.channel_id, "C123");
        assert_eq!(mention.user_id, "U456");
    }

    #[test]
    fn missing_channel_is_a_parse_error() {
        let event = json!({"type": "app_mention", "ts": "1.2"});
        assert!(matches!(
            parse_mention(&event),
            Err(SlackError::ParseError(_))
        ));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-slack-signature", "v0=abc".parse().unwrap());
        assert_eq!(
            get_header_value(&headers, "X-Slack-Signature"),
            Some("v0=abc")
        );
    }
}
