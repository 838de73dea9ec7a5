//! Conversation messages and the bug records shown as result cards.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================
// Bug results
// =============================================================

/// Lifecycle status of a matched bug. Unknown strings are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BugStatus {
    Resolved,
    InProgress,
    Open,
    Other(String),
}

impl BugStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Resolved => "resolved",
            Self::InProgress => "in-progress",
            Self::Open => "open",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for BugStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "resolved" => Self::Resolved,
            "in-progress" => Self::InProgress,
            "open" => Self::Open,
            _ => Self::Other(raw),
        }
    }
}

impl From<BugStatus> for String {
    fn from(status: BugStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Severity of a matched bug. Unknown strings are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other(raw),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

/// A candidate matching defect, as returned by a query. Read-only in the UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: BugStatus,
    pub severity: Severity,
    pub product: String,
    #[serde(default)]
    pub resolution: Option<String>,
    /// In `[0, 1]`.
    pub similarity_score: f64,
}

impl BugResult {
    /// Score as a whole percentage, the "92% match" shown on a card.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn match_percentage(&self) -> u8 {
        let score = if self.similarity_score.is_nan() { 0.0 } else { self.similarity_score.clamp(0.0, 1.0) };
        (score * 100.0).round() as u8
    }
}

// =============================================================
// Messages
// =============================================================

/// Who a message came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Response,
}

/// Metadata of an image the user sent. The bytes are not kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub name: String,
    pub size_bytes: usize,
    pub mime_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MessageContent {
    Text(String),
    Image(ImageRef),
    Bugs(Vec<BugResult>),
    /// A failed query, rendered as an error bubble.
    Error(String),
}

/// One entry in the conversation. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub kind: MessageKind,
    pub content: MessageContent,
    pub is_image: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn user_text(text: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self { kind: MessageKind::User, content: MessageContent::Text(text.into()), is_image: false, timestamp }
    }

    #[must_use]
    pub fn user_image(image: ImageRef, timestamp: OffsetDateTime) -> Self {
        Self { kind: MessageKind::User, content: MessageContent::Image(image), is_image: true, timestamp }
    }

    #[must_use]
    pub fn response(content: MessageContent, timestamp: OffsetDateTime) -> Self {
        Self { kind: MessageKind::Response, content, is_image: false, timestamp }
    }

    #[must_use]
    pub fn error(message: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self::response(MessageContent::Error(message.into()), timestamp)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.content, MessageContent::Error(_))
    }
}
