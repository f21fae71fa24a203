//! HTTP server and request processing

pub mod event_handler;
pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod signature;
pub mod summarize_handler;

// Re-export the main entrypoints for convenience
pub use handler::{AppState, router, serve};
