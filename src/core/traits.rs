//! Seams between the mention pipeline and the services it talks to.
//!
//! Production wires in [`crate::slack::SlackClient`], [`crate::web::ContentFetcher`]
//! and [`crate::ai::LlmClient`]; tests substitute in-memory doubles.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::ChatCompletionMessage;

use crate::core::models::FetchResult;
use crate::errors::SlackError;

/// Sampling parameters for a single chat completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: i64,
    pub temperature: f64,
}

/// Text-in/text-out access to a chat-completion model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the content of the first completion choice.
    async fn complete(
        &self,
        messages: Vec<ChatCompletionMessage>,
        options: CompletionOptions,
    ) -> Result<String, SlackError>;
}

/// Web page retrieval.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Readable text of the page at `url`.
    async fn fetch_content(&self, url: &str) -> FetchResult;

    /// Text of the page's `<title>`.
    async fn fetch_title(&self, url: &str) -> FetchResult;
}

/// The subset of the Slack Web API the bot needs.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Text of the message that started the thread `thread_ts` in `channel_id`.
    async fn thread_parent_text(&self, channel_id: &str, thread_ts: &str)
    -> Result<String, SlackError>;

    async fn post_in_thread(
        &self,
        channel_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SlackError>;
}
