//! LLM (`OpenAI`) API client module
//!
//! Sends chat-completion requests over `reqwest` and returns the first
//! choice's text.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::traits::{ChatModel, CompletionOptions};
use crate::errors::SlackError;

pub const DEFAULT_MODEL: &str = openai_api_rs::v1::common::GPT4_O;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// LLM API client for generating summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: String,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key,
            org_id,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config
                .openai_model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            config.openai_base_url.clone(),
        )
    }

    #[must_use]
    pub fn build_request_body(
        &self,
        messages: &[ChatCompletionMessage],
        options: CompletionOptions,
    ) -> Value {
        json!({
            "model": self.model_name,
            "messages": messages.iter().map(message_to_json).collect::<Vec<_>>(),
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        })
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(
        &self,
        messages: Vec<ChatCompletionMessage>,
        options: CompletionOptions,
    ) -> Result<String, SlackError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{:?}", messages);

        let estimated_input_tokens = messages
            .iter()
            .map(|msg| estimate_tokens(&format!("{:?}", msg.content)))
            .sum::<usize>();
        info!(
            model = %self.model_name,
            estimated_input_tokens,
            "Requesting chat completion"
        );

        let mut request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(&messages, options));

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SlackError::OpenAIError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| SlackError::OpenAIError(format!("Failed to parse OpenAI response: {e}")))?;

        first_choice_text(&response_json).ok_or_else(|| {
            SlackError::OpenAIError("OpenAI response contained no completion text".to_string())
        })
    }
}

/// `choices[0].message.content` of a chat-completion response.
#[must_use]
pub fn first_choice_text(response: &Value) -> Option<String> {
    response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn message_to_json(message: &ChatCompletionMessage) -> Value {
    let role = match message.role {
        MessageRole::system => "system",
        MessageRole::assistant => "assistant",
        _ => "user",
    };

    let content = match &message.content {
        Content::Text(text) => text.clone(),
        _ => String::new(),
    };

    json!({ "role": role, "content": content })
}
