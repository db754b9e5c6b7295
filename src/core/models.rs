use serde::{Deserialize, Serialize};

/// A message attachment as returned inside `conversations.history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub fallback: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pretext: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(rename = "type", default)]
    pub message_type: String,
    #[serde(rename = "user", default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
    /// Slack's message timestamp, unique within the channel.
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Human-readable identifier used when logging a deletion.
    ///
    /// The message text when non-empty, otherwise the title of the first
    /// attachment. `None` when the message has neither.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        if !self.text.is_empty() {
            return Some(&self.text);
        }
        self.attachments.first().map(|a| a.title.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// One page of `conversations.history`.
///
/// When `ok` is false only `error` is meaningful.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryPage {
    pub ok: bool,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(rename = "response_metadata", default)]
    pub metadata: ResponseMetadata,
    #[serde(rename = "error", default)]
    pub error_message: String,
}

impl HistoryPage {
    #[must_use]
    pub fn next_cursor(&self) -> &str {
        &self.metadata.next_cursor
    }
}

/// JSON body for `chat.delete`. Field order is the wire order.
#[derive(Debug, Serialize)]
pub struct DeleteRequest<'a> {
    pub channel: &'a str,
    pub ts: &'a str,
}

/// Outcome of a full history walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Number of history pages processed.
    pub pages: usize,
    /// Timestamps of every message visited, in processing order.
    pub timestamps: Vec<String>,
    /// Whether deletions were sent or only logged.
    pub executed: bool,
}
