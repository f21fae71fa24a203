//! All AI/LLM functionality

pub mod client;
pub mod prompt;
pub mod summarizer;

// Re-export main types for convenience
pub use client::{LlmClient, estimate_tokens};
pub use summarizer::Summarizer;
