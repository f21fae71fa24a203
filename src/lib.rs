//! linksum - A Slack bot that summarizes the page a message links to.
//!
//! Mention the bot next to a link (or inside a thread that starts with one)
//! and it replies in the thread with an LLM summary of the page. The same
//! summarizer is also exposed as a plain `POST /summarize` endpoint.
//!
//! # Architecture
//!
//! The pipeline for one mention is:
//! 1. Resolve the text to inspect (the mention, or the thread's parent message)
//! 2. Extract the first Slack-formatted URL
//! 3. Fetch the page and strip it down to readable text
//! 4. Summarize with `OpenAI` chat completions
//! 5. Reply in the thread
//!
//! The system uses:
//! - axum for the Events API webhook and the summarize endpoint
//! - slack-morphism for Slack API interactions
//! - reqwest + scraper for fetching and cleaning pages
//! - openai-api-rs message types for ChatGPT integration
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use linksum::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     linksum::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     linksum::api::serve(config).await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod slack;
pub mod utils;
pub mod web;

pub use ai::estimate_tokens;
pub use errors::SlackError;

/// Configure structured JSON logging.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls keep the first subscriber.
///
/// # Example
///
/// ```
/// linksum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
