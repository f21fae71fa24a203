//! HTTP entrypoint - thin router that delegates to specialized handlers.
//!
//! - `POST /slack/events` (delegated to `event_handler`)
//! - `POST /summarize` (delegated to `summarize_handler`)
//! - `GET /health`

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use super::{event_handler, summarize_handler};
use crate::ai::{LlmClient, Summarizer};
use crate::core::config::AppConfig;
use crate::errors::SlackError;
use crate::features::{MentionHandler, MentionOptions};
use crate::slack::SlackClient;
use crate::web::ContentFetcher;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub signing_secret: Arc<str>,
    pub mentions: Arc<MentionHandler>,
    pub summarizer: Summarizer,
}

impl AppState {
    #[must_use]
    pub fn new(signing_secret: &str, mentions: MentionHandler, summarizer: Summarizer) -> Self {
        Self {
            signing_secret: Arc::from(signing_secret),
            mentions: Arc::new(mentions),
            summarizer,
        }
    }

    /// Wire the production Slack, fetch and OpenAI clients.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SlackError> {
        let summarizer = Summarizer::new(Arc::new(LlmClient::from_config(config)));
        let mentions = MentionHandler::new(
            Arc::new(SlackClient::from_config(config)?),
            Arc::new(ContentFetcher::from_config(config)?),
            summarizer.clone(),
            MentionOptions::from_config(config),
        );

        Ok(Self::new(&config.slack_signing_secret, mentions, summarizer))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/slack/events", post(event_handler::handle_events))
        .route("/summarize", post(summarize_handler::handle_summarize))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the clients cannot be built or the address cannot be bound.
pub async fn serve(config: AppConfig) -> Result<(), SlackError> {
    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| SlackError::GeneralError(format!("Failed to bind {}: {e}", config.bind_addr)))?;

    info!(addr = %config.bind_addr, "linksum listening");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| SlackError::GeneralError(format!("Server exited with error: {e}")))
}
