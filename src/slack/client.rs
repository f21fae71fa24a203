//! Slack API client module
//!
//! Threaded replies go through slack-morphism; `conversations.replies` is
//! read with plain HTTP so the `ok` flag and message list can be inspected
//! directly.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::AppConfig;
use crate::core::traits::SlackApi;
use crate::errors::SlackError;

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

#[derive(Debug, Deserialize)]
struct RepliesResponse {
    ok: bool,
    #[serde(default)]
    messages: Vec<ReplyMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    text: String,
}

/// Slack Web API client
pub struct SlackClient {
    token: SlackApiToken,
    api_base_url: String,
    http: Client,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: String, api_base_url: String) -> Result<Self, SlackError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SlackError::HttpError(format!("Failed to build Slack HTTP client: {e}")))?;

        Ok(Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SlackError> {
        Self::new(
            config.slack_bot_token.clone(),
            config.slack_api_base_url.clone(),
        )
    }

    /// Text of the first message returned by `conversations.replies`, i.e.
    /// the message that started the thread.
    ///
    /// # Errors
    ///
    /// `ApiError` when Slack answers `ok: false` or a non-2xx status,
    /// `MissingParent` when the thread has no messages, `HttpError` or
    /// `ParseError` when the call itself fails.
    pub async fn get_thread_parent_text(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<String, SlackError> {
        let resp = self
            .http
            .get(format!("{}/conversations.replies", self.api_base_url))
            .bearer_auth(&self.token.token_value.0)
            .query(&[("channel", channel_id), ("ts", thread_ts), ("limit", "1")])
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("conversations.replies HTTP: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "conversations.replies HTTP {}",
                resp.status()
            )));
        }

        let body: RepliesResponse = resp
            .json()
            .await
            .map_err(|e| SlackError::ParseError(format!("conversations.replies parse: {e}")))?;

        if !body.ok {
            return Err(SlackError::ApiError(format!(
                "conversations.replies error: {}",
                body.error.as_deref().unwrap_or("unknown")
            )));
        }

        let parent = body
            .messages
            .into_iter()
            .next()
            .ok_or(SlackError::MissingParent)?;

        debug!(channel = %channel_id, thread_ts = %thread_ts, "Fetched thread parent");
        Ok(parent.text)
    }

    /// Post a plain-text reply into a specific thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the connector is unavailable or Slack rejects the message.
    pub async fn post_message_in_thread(
        &self,
        channel_id: &str,
        thread_ts: &str,
        message: &str,
    ) -> Result<(), SlackError> {
        let session = SLACK_CLIENT
            .as_ref()
            .ok_or_else(|| {
                SlackError::GeneralError("Slack HTTP connector not initialized".to_string())
            })?
            .open_session(&self.token);

        let post_req = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackMessageContent::new().with_text(message.to_string()),
        )
        .with_thread_ts(SlackTs(thread_ts.to_string()));

        session.chat_post_message(&post_req).await?;

        Ok(())
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn thread_parent_text(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<String, SlackError> {
        self.get_thread_parent_text(channel_id, thread_ts).await
    }

    async fn post_in_thread(
        &self,
        channel_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SlackError> {
        self.post_message_in_thread(channel_id, thread_ts, text)
            .await
    }
}
