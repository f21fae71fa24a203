//! Outbound page fetching

pub mod fetcher;

pub use fetcher::{ContentFetcher, extract_article_text, extract_title};
