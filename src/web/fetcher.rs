//! Page fetching and readable-text extraction.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::FetchResult;
use crate::core::traits::ContentSource;
use crate::errors::{FetchError, SlackError};

/// Subtrees that never carry article text.
const STRIPPED_TAGS: &[&str] = &["header", "footer", "aside", "nav", "script", "style"];

pub const NO_TITLE: &str = "No Title Found";

const USER_AGENT: &str = concat!("linksum/", env!("CARGO_PKG_VERSION"));

/// HTTP fetcher that turns a page into plain text.
pub struct ContentFetcher {
    client: Client,
    delay: Duration,
    content_timeout: Duration,
    title_timeout: Duration,
}

impl ContentFetcher {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        delay: Duration,
        content_timeout: Duration,
        title_timeout: Duration,
    ) -> Result<Self, SlackError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SlackError::HttpError(format!("Failed to build fetch HTTP client: {e}")))?;

        Ok(Self {
            client,
            delay,
            content_timeout,
            title_timeout,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SlackError> {
        Self::new(
            config.fetch_delay,
            config.fetch_timeout,
            config.title_timeout,
        )
    }

    /// Fetch `url` and return the readable text of its main content.
    ///
    /// Waits for the configured courtesy delay before every request.
    pub async fn get_article_content(&self, url: &str) -> FetchResult {
        if let Err(e) = Url::parse(url) {
            warn!(url = %url, error = %e, "Refusing to fetch malformed URL");
            return Err(FetchError::Unreachable {
                url: url.to_string(),
            });
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let html = match self.download(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching URL");
                return Err(FetchError::Unreachable {
                    url: url.to_string(),
                });
            }
        };

        debug!(url = %url, bytes = html.len(), "Fetched page");
        extract_article_text(&html)
    }

    /// Fetch `url` and return the text of its `<title>`.
    pub async fn get_page_title(&self, url: &str) -> FetchResult {
        let response = match self
            .client
            .get(url)
            .timeout(self.title_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching page title");
                return Err(FetchError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        match response.text().await {
            Ok(html) => Ok(extract_title(&html)),
            Err(e) => Err(FetchError::Transport(e.to_string())),
        }
    }

    async fn download(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .timeout(self.content_timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl ContentSource for ContentFetcher {
    async fn fetch_content(&self, url: &str) -> FetchResult {
        self.get_article_content(url).await
    }

    async fn fetch_title(&self, url: &str) -> FetchResult {
        self.get_page_title(url).await
    }
}

/// Readable text of the first `<article>`, or of `<body>` when there is none.
///
/// Text nodes are trimmed, blank ones dropped, and the rest joined with
/// newlines. Header, footer, navigation, aside, script and style subtrees
/// are skipped.
///
/// # Errors
///
/// Returns `FetchError::NoContent` if the chosen element yields no text.
pub fn extract_article_text(html: &str) -> FetchResult {
    let document = Html::parse_document(html);

    let Some(root) = first_element(&document, "article").or_else(|| first_element(&document, "body"))
    else {
        return Err(FetchError::NoContent);
    };

    let mut lines = Vec::new();
    collect_text(root, &mut lines);

    if lines.is_empty() {
        Err(FetchError::NoContent)
    } else {
        Ok(lines.join("\n"))
    }
}

/// Trimmed `<title>` text, or [`NO_TITLE`].
#[must_use]
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    first_element(&document, "title")
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn first_element<'a>(document: &'a Html, tag: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tag).ok()?;
    document.select(&selector).next()
}

fn collect_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            Node::Element(el) if STRIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}
