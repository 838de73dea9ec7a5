//! Query backends.
//!
//! DESIGN
//! ======
//! The controller never knows where answers come from. [`QueryBackend`] has
//! one method per query variant; [`MockBackend`] returns the canned demo
//! results (with optional simulated latency) and
//! [`crate::relay::RelayBackend`] talks to the relay server.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::path::Path;
use std::time::Duration;

use crate::message::{BugResult, BugStatus, ImageRef, MessageContent, Severity};

const MOCK_TEXT_DELAY: Duration = Duration::from_millis(1500);
const MOCK_IMAGE_DELAY: Duration = Duration::from_millis(2000);

// =============================================================
// Errors and responses
// =============================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("could not reach the server: {0}")]
    Transport(String),
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected server response: {0}")]
    MalformedResponse(String),
    #[error("the assistant returned an empty answer")]
    EmptyResponse,
    #[error("could not read image: {0}")]
    ImageRead(String),
}

/// Answer to a query, before it becomes a message.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Bugs(Vec<BugResult>),
    Text(String),
}

impl From<QueryResponse> for MessageContent {
    fn from(response: QueryResponse) -> Self {
        match response {
            QueryResponse::Bugs(bugs) => Self::Bugs(bugs),
            QueryResponse::Text(text) => Self::Text(text),
        }
    }
}

// =============================================================
// Image uploads
// =============================================================

/// An image picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk, detecting its MIME type from the content.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ImageRead`] if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, QueryError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| QueryError::ImageRead(format!("{}: {e}", path.display())))?;
        let name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        let mime_type = detect_mime(&name, &bytes).to_string();
        Ok(Self { name, mime_type, bytes })
    }

    /// Metadata kept in the conversation in place of the bytes.
    #[must_use]
    pub fn image_ref(&self) -> ImageRef {
        ImageRef { name: self.name.clone(), size_bytes: self.bytes.len(), mime_type: self.mime_type.clone() }
    }
}

/// MIME type sniffed from the content, falling back to the file name for
/// text formats the magic-byte table cannot see (SVG).
#[must_use]
pub fn detect_mime(name: &str, bytes: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type();
    }
    let is_svg = name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("svg"));
    if is_svg { "image/svg+xml" } else { "application/octet-stream" }
}

// =============================================================
// Backend trait
// =============================================================

/// Answers the widget's two kinds of query.
#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    /// Search for bugs matching a pasted error message.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] when the query cannot be answered.
    async fn text_query(&self, text: &str) -> Result<Vec<BugResult>, QueryError>;

    /// Ask about a screenshot.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] when the upload or the answer fails.
    async fn image_query(&self, image: &ImageUpload) -> Result<QueryResponse, QueryError>;
}

// =============================================================
// Mock backend
// =============================================================

/// Canned results, answered after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockBackend {
    text_delay: Duration,
    image_delay: Duration,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self { text_delay: MOCK_TEXT_DELAY, image_delay: MOCK_IMAGE_DELAY }
    }
}

impl MockBackend {
    /// Mock with the demo latencies (1.5s text, 2s image).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self { text_delay: Duration::ZERO, image_delay: Duration::ZERO }
    }
}

#[async_trait::async_trait]
impl QueryBackend for MockBackend {
    async fn text_query(&self, _text: &str) -> Result<Vec<BugResult>, QueryError> {
        if !self.text_delay.is_zero() {
            tokio::time::sleep(self.text_delay).await;
        }
        Ok(mock_text_results())
    }

    async fn image_query(&self, _image: &ImageUpload) -> Result<QueryResponse, QueryError> {
        if !self.image_delay.is_zero() {
            tokio::time::sleep(self.image_delay).await;
        }
        Ok(QueryResponse::Bugs(mock_image_results()))
    }
}

/// Demo results for any text query.
#[must_use]
pub fn mock_text_results() -> Vec<BugResult> {
    vec![
        BugResult {
            id: "BUG-1234".into(),
            title: "Application crashes when disk space is low".into(),
            description: "The application fails to handle low disk space gracefully and crashes without warning."
                .into(),
            status: BugStatus::Resolved,
            severity: Severity::High,
            product: "DAPA".into(),
            resolution: Some("Added proper error handling for disk space checks and user notifications.".into()),
            similarity_score: 0.92,
        },
        BugResult {
            id: "BUG-789".into(),
            title: "Disk space warning not showing correctly".into(),
            description: "Warning about low disk space appears even when there is sufficient space available.".into(),
            status: BugStatus::InProgress,
            severity: Severity::Medium,
            product: "COsec".into(),
            resolution: None,
            similarity_score: 0.78,
        },
    ]
}

/// Demo results for any image query.
#[must_use]
pub fn mock_image_results() -> Vec<BugResult> {
    vec![BugResult {
        id: "BUG-5678".into(),
        title: "Error dialog appears with incorrect formatting".into(),
        description: "Error messages in dialog boxes have formatting issues, making them hard to read.".into(),
        status: BugStatus::Open,
        severity: Severity::Medium,
        product: "DPM".into(),
        resolution: None,
        similarity_score: 0.89,
    }]
}
