use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::errors::SlackError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);

/// What the bot posts back once it has a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyMode {
    /// LLM summary of the article body.
    #[default]
    Summary,
    /// First 500 characters of the extracted text.
    Preview,
    /// The page `<title>` only.
    Title,
}

impl FromStr for ReplyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(ReplyMode::Summary),
            "preview" => Ok(ReplyMode::Preview),
            "title" => Ok(ReplyMode::Title),
            other => Err(format!("unknown reply mode '{other}'")),
        }
    }
}

/// Where the mention handler looks for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSource {
    /// Only the mention's own text.
    Message,
    /// Only the parent message of the thread the mention was posted in.
    Thread,
    /// The mention's own text, then the thread parent when replying in a thread.
    #[default]
    Auto,
}

impl FromStr for TextSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" => Ok(TextSource::Message),
            "thread" => Ok(TextSource::Thread),
            "auto" => Ok(TextSource::Auto),
            other => Err(format!("unknown text source '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_signing_secret: String,
    pub slack_bot_token: String,
    pub slack_api_base_url: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: String,
    pub bind_addr: SocketAddr,
    pub reply_mode: ReplyMode,
    pub text_source: TextSource,
    pub accept_bare_urls: bool,
    pub fetch_delay: Duration,
    pub fetch_timeout: Duration,
    pub title_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::ConfigError` naming the first missing or malformed variable.
    pub fn from_env() -> Result<Self, SlackError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::ConfigError` naming the first missing or malformed variable.
    pub fn from_vars<F>(lookup: F) -> Result<Self, SlackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SlackError::ConfigError(format!("{key}: environment variable not found")))
        };

        Ok(Self {
            slack_signing_secret: required("SLACK_SIGNING_SECRET")?,
            slack_bot_token: required("SLACK_BOT_TOKEN")?,
            slack_api_base_url: lookup("SLACK_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SLACK_API_BASE_URL.to_string()),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_id: lookup("OPENAI_ORG_ID"),
            openai_model: lookup("OPENAI_MODEL"),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            bind_addr: parse_or(&lookup, "BIND_ADDR", || DEFAULT_BIND_ADDR)?,
            reply_mode: parse_or(&lookup, "REPLY_MODE", ReplyMode::default)?,
            text_source: parse_or(&lookup, "TEXT_SOURCE", TextSource::default)?,
            accept_bare_urls: parse_or(&lookup, "ACCEPT_BARE_URLS", || false)?,
            fetch_delay: Duration::from_millis(parse_or(&lookup, "FETCH_DELAY_MS", || 1000)?),
            fetch_timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECS", || 20)?),
            title_timeout: Duration::from_secs(parse_or(&lookup, "TITLE_TIMEOUT_SECS", || 5)?),
        })
    }
}

fn parse_or<F, T, D>(lookup: &F, key: &str, default: D) -> Result<T, SlackError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> T,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| SlackError::ConfigError(format!("{key}: {e}"))),
        _ => Ok(default()),
    }
}
