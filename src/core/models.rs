use serde::{Deserialize, Serialize};

use crate::errors::{FetchError, SummarizeError};

/// An `app_mention` event, reduced to the fields the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMention {
    pub text: String,
    pub thread_ts: Option<String>,
    pub ts: String,
    pub channel_id: String,
    pub user_id: String,
}

impl InboundMention {
    /// Thread every reply is posted into: the enclosing thread, or the
    /// mention itself when it is a top-level message.
    #[must_use]
    pub fn reply_thread_ts(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }

    /// True when the mention is a reply inside somebody else's thread.
    #[must_use]
    pub fn is_thread_reply(&self) -> bool {
        self.thread_ts
            .as_deref()
            .is_some_and(|thread_ts| thread_ts != self.ts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundReply {
    pub text: String,
    pub thread_ts: String,
}

pub type FetchResult = Result<String, FetchError>;

pub type SummaryResult = Result<String, SummarizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(ts: &str, thread_ts: Option<&str>) -> InboundMention {
        InboundMention {
            text: String::new(),
            thread_ts: thread_ts.map(str::to_string),
            ts: ts.to_string(),
            channel_id: "C1".to_string(),
            user_id: "U1".to_string(),
        }
    }

    #[test]
    fn top_level_mention_replies_under_itself() {
        let m = mention("111.1", None);
        assert_eq!(m.reply_thread_ts(), "111.1");
        assert!(!m.is_thread_reply());
    }

    #[test]
    fn thread_reply_targets_the_thread() {
        let m = mention("222.2", Some("111.1"));
        assert_eq!(m.reply_thread_ts(), "111.1");
        assert!(m.is_thread_reply());
    }

    #[test]
    fn thread_starter_is_not_a_reply() {
        let m = mention("111.1", Some("111.1"));
        assert!(!m.is_thread_reply());
    }
}
