use regex::Regex;

/// Slack link formatting wraps URLs in angle brackets:
/// - `<http://example.com/>`
/// - `<http://www.example.com|This message *is* a link>`
///
/// Source: https://docs.slack.dev/messaging/formatting-message-text/#linking-urls
static SLACK_LINK_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"<(https?://[^>|]+)(?:\|[^>]*)?>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// First Slack-formatted link in `text`, without the brackets or label.
///
/// Only the syntactic shape is checked; a malformed URL is returned as-is
/// and fails later when it is fetched.
#[must_use]
pub fn extract_url(text: &str) -> Option<String> {
    SLACK_LINK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First whitespace-separated token starting with `http`.
///
/// Kept for clients that post URLs without Slack's link markup.
#[must_use]
pub fn extract_bare_url(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|token| token.starts_with("http"))
        .map(str::to_string)
}

/// Slack-formatted link first, then (when enabled) a bare token.
#[must_use]
pub fn find_url(text: &str, accept_bare: bool) -> Option<String> {
    extract_url(text).or_else(|| {
        if accept_bare {
            extract_bare_url(text)
        } else {
            None
        }
    })
}
