use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

/// Upper bound the model is asked to respect, in characters.
pub const MAX_SUMMARY_CHARS: usize = 500;

pub const MAX_OUTPUT_TOKENS: i64 = 700;

pub const TEMPERATURE: f64 = 0.7;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes web articles for a Slack workspace.";

/// Delimits the article inside the user prompt.
pub const ARTICLE_FENCE: &str = "\"\"\"";

/// Remove control characters (other than line breaks and tabs) before the
/// article is embedded in the prompt.
#[must_use]
pub fn sanitize_article(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

#[must_use]
pub fn summary_instructions(article: &str) -> String {
    format!(
        "Summarize the following article in {MAX_SUMMARY_CHARS} characters or fewer.\n\
         Format the summary with Slack markup:\n\
         - Bold: wrap words in single asterisks and leave a space on both sides, e.g. ` *important* `\n\
         - Numbered lists: `1.`, `2.`, `3.` at the start of a line\n\
         - Bullet lists: `•` at the start of a line\n\
         - Block quotes: `>` at the start of a line\n\n\
         Article:\n{ARTICLE_FENCE}\n{}\n{ARTICLE_FENCE}",
        sanitize_article(article)
    )
}

/// Chat messages asking the model to summarize `article`.
#[must_use]
pub fn build_summary_prompt(article: &str) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(SYSTEM_PROMPT.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(summary_instructions(article)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}
