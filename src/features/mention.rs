//! `app_mention` pipeline: resolve text, extract URL, fetch, summarize, reply.

use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::ai::Summarizer;
use crate::core::config::{AppConfig, ReplyMode, TextSource};
use crate::core::models::{InboundMention, OutboundReply};
use crate::core::traits::{ContentSource, SlackApi};
use crate::errors::{MentionError, SlackError};
use crate::utils::links::find_url;

/// Characters of extracted text shown in preview mode.
pub const PREVIEW_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MentionOptions {
    pub reply_mode: ReplyMode,
    pub text_source: TextSource,
    pub accept_bare_urls: bool,
}

impl MentionOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            reply_mode: config.reply_mode,
            text_source: config.text_source,
            accept_bare_urls: config.accept_bare_urls,
        }
    }
}

pub struct MentionHandler {
    slack: Arc<dyn SlackApi>,
    fetcher: Arc<dyn ContentSource>,
    summarizer: Summarizer,
    options: MentionOptions,
}

impl MentionHandler {
    #[must_use]
    pub fn new(
        slack: Arc<dyn SlackApi>,
        fetcher: Arc<dyn ContentSource>,
        summarizer: Summarizer,
        options: MentionOptions,
    ) -> Self {
        Self {
            slack,
            fetcher,
            summarizer,
            options,
        }
    }

    /// Run the pipeline for `mention` and post the outcome into its thread.
    pub async fn handle(&self, mention: &InboundMention) -> OutboundReply {
        let reply = self.build_reply(mention).await;

        match self
            .slack
            .post_in_thread(&mention.channel_id, &reply.thread_ts, &reply.text)
            .await
        {
            Ok(()) => info!(thread_ts = %reply.thread_ts, "Posted reply"),
            Err(e) => error!(thread_ts = %reply.thread_ts, error = %e, "Failed to post reply"),
        }

        reply
    }

    /// Run the pipeline without posting anything.
    pub async fn build_reply(&self, mention: &InboundMention) -> OutboundReply {
        let text = match self.reply_text(mention).await {
            Ok(text) => text,
            Err(e) if e.is_guidance() => {
                info!(reason = %e, "Mention did not carry a usable URL");
                e.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Mention could not be processed");
                e.to_string()
            }
        };

        OutboundReply {
            text,
            thread_ts: mention.reply_thread_ts().to_string(),
        }
    }

    async fn reply_text(&self, mention: &InboundMention) -> Result<String, MentionError> {
        let url = self.resolve_url(mention).await?;
        info!(url = %url, mode = ?self.options.reply_mode, "Processing URL");

        match self.options.reply_mode {
            ReplyMode::Title => {
                let title = self.fetcher.fetch_title(&url).await?;
                Ok(format!("Page title: {title}"))
            }
            ReplyMode::Preview => {
                let content = self.fetcher.fetch_content(&url).await?;
                Ok(format_preview(&content))
            }
            // A summarizer failure is still a reply, not an error.
            ReplyMode::Summary => {
                let content = self.fetcher.fetch_content(&url).await?;
                Ok(self
                    .summarizer
                    .summarize(&content)
                    .await
                    .unwrap_or_else(|e| e.to_string()))
            }
        }
    }

    async fn resolve_url(&self, mention: &InboundMention) -> Result<String, MentionError> {
        let accept_bare = self.options.accept_bare_urls;

        match self.options.text_source {
            TextSource::Message => {
                find_url(&mention.text, accept_bare).ok_or(MentionError::NoUrlFound)
            }
            TextSource::Thread => {
                if !mention.is_thread_reply() {
                    return Err(MentionError::ThreadContextMissing);
                }
                self.url_from_parent(mention).await
            }
            TextSource::Auto => {
                if let Some(url) = find_url(&mention.text, accept_bare) {
                    return Ok(url);
                }
                if mention.is_thread_reply() {
                    self.url_from_parent(mention).await
                } else {
                    Err(MentionError::NoUrlFound)
                }
            }
        }
    }

    async fn url_from_parent(&self, mention: &InboundMention) -> Result<String, MentionError> {
        let thread_ts = mention.reply_thread_ts();
        let parent = self
            .slack
            .thread_parent_text(&mention.channel_id, thread_ts)
            .await
            .map_err(|e| match e {
                SlackError::ApiError(_) | SlackError::HttpError(_) | SlackError::MissingParent => {
                    warn!(thread_ts = %thread_ts, error = %e, "Failed to retrieve parent message");
                    MentionError::ParentUnavailable
                }
                other => MentionError::Unhandled(other.to_string()),
            })?;

        find_url(&parent, self.options.accept_bare_urls).ok_or(MentionError::NoUrlInParent)
    }
}

/// Handle `mention` on its own task and return immediately.
///
/// A panic inside the pipeline is reported into the thread as `Error: ...`
/// instead of dropping the event silently.
pub fn spawn_mention(handler: Arc<MentionHandler>, mention: InboundMention) -> JoinHandle<()> {
    let correlation_id = Uuid::new_v4();
    let span = info_span!(
        "mention",
        %correlation_id,
        channel = %mention.channel_id,
        user = %mention.user_id,
        ts = %mention.ts
    );

    tokio::spawn(
        async move {
            let worker = {
                let handler = Arc::clone(&handler);
                let mention = mention.clone();
                tokio::spawn(
                    async move {
                        handler.handle(&mention).await;
                    }
                    .in_current_span(),
                )
            };

            if let Err(join_err) = worker.await {
                warn!(error = %join_err, "Mention pipeline aborted");
                let text = MentionError::Unhandled(abort_message(join_err)).to_string();
                if let Err(e) = handler
                    .slack
                    .post_in_thread(&mention.channel_id, mention.reply_thread_ts(), &text)
                    .await
                {
                    error!(error = %e, "Failed to post error reply");
                }
            }
        }
        .instrument(span),
    )
}

/// The panic payload's message, or the join error itself for cancellations
/// and non-string payloads.
fn abort_message(join_err: JoinError) -> String {
    if !join_err.is_panic() {
        return join_err.to_string();
    }
    let payload = join_err.into_panic();
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "unknown panic".to_string(),
        },
    }
}

#[must_use]
pub fn format_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_LENGTH).collect();
    if content.chars().count() > PREVIEW_LENGTH {
        preview.push_str("...");
    }
    format!("Here's the content preview for the URL:\n{preview}")
}
