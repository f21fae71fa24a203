use std::sync::Arc;
use tracing::{info, warn};

use super::prompt::{MAX_OUTPUT_TOKENS, TEMPERATURE, build_summary_prompt};
use crate::core::models::SummaryResult;
use crate::core::traits::{ChatModel, CompletionOptions};
use crate::errors::SummarizeError;

/// Turns article text into a short Slack-formatted summary.
///
/// The model's answer is returned verbatim; length and markup are not
/// checked here.
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn ChatModel>,
}

impl Summarizer {
    #[must_use]
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn summarize(&self, article: &str) -> SummaryResult {
        let options = CompletionOptions {
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        match self
            .model
            .complete(build_summary_prompt(article), options)
            .await
        {
            Ok(summary) => {
                info!(chars = summary.chars().count(), "Generated summary");
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed");
                Err(SummarizeError::Service)
            }
        }
    }
}
