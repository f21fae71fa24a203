use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Thread has no parent message")]
    MissingParent,

    #[error("{0}")]
    GeneralError(String),
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for SlackError {
    fn from(error: anyhow::Error) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

/// Why fetching a page did not produce usable text.
///
/// The `Display` output is the exact reason shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport error or non-2xx status while fetching article content.
    #[error("Failed to fetch content from {url}. Please check the URL.")]
    Unreachable { url: String },

    /// Neither `<article>` nor `<body>` yielded any text.
    #[error("Content could not be extracted. Returning raw HTML.")]
    NoContent,

    /// Title lookup got a non-200 response.
    #[error("Received status code {0}")]
    Status(u16),

    /// Title lookup failed before a response arrived.
    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("Failed to generate a summary using OpenAI.")]
    Service,
}

/// Terminal outcomes of a mention that never reached the summarizer.
///
/// Every variant renders as the reply text posted back into the thread.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MentionError {
    #[error("Please provide a valid URL.")]
    NoUrlFound,

    #[error("No valid URL was found in the parent message of this thread.")]
    NoUrlInParent,

    #[error("Please mention me in a reply inside a thread whose first message contains a URL.")]
    ThreadContextMissing,

    #[error("Failed to retrieve the parent message.")]
    ParentUnavailable,

    #[error("Error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Error: {0}")]
    Unhandled(String),
}

impl MentionError {
    /// Guidance replies are expected user mistakes rather than failures.
    #[must_use]
    pub fn is_guidance(&self) -> bool {
        matches!(
            self,
            MentionError::NoUrlFound
                | MentionError::NoUrlInParent
                | MentionError::ThreadContextMissing
        )
    }
}
