//! Chat widget controller.
//!
//! DESIGN
//! ======
//! The controller is synchronous state. Submitting returns a request command
//! (or `None` when the submission is ignored); the caller runs the command
//! against any [`QueryBackend`] and feeds the outcome back with
//! `finish_*`. This keeps the state free of locks and lets a view layer run
//! requests on whatever executor it has.
//!
//! ```text
//! submit_text ──▶ TextRequest ──run(backend)──▶ TextOutcome ──▶ finish_text
//! submit_image ─▶ ImageRequest ─run(backend)──▶ ImageOutcome ─▶ finish_image
//! ```
//!
//! The two lifecycles are independent: a pending text query never blocks an
//! image upload and vice versa.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use time::OffsetDateTime;

use crate::backend::{ImageUpload, QueryBackend, QueryError, QueryResponse};
use crate::message::{BugResult, Message, MessageContent};
use crate::query::{ImageQuery, QueryKind, TextQuery, Ticket};
use crate::visibility::{Visibility, VisibilityEvent};

// =============================================================================
// REQUESTS AND OUTCOMES
// =============================================================================

/// A text search ready to run.
#[derive(Debug, Clone)]
pub struct TextRequest {
    ticket: Ticket,
    text: String,
}

impl TextRequest {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub async fn run(self, backend: &dyn QueryBackend) -> TextOutcome {
        let result = backend.text_query(&self.text).await;
        TextOutcome { ticket: self.ticket, result }
    }
}

#[derive(Debug, Clone)]
pub struct TextOutcome {
    ticket: Ticket,
    result: Result<Vec<BugResult>, QueryError>,
}

/// An image upload ready to run.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    ticket: Ticket,
    upload: ImageUpload,
}

impl ImageRequest {
    #[must_use]
    pub fn upload(&self) -> &ImageUpload {
        &self.upload
    }

    pub async fn run(self, backend: &dyn QueryBackend) -> ImageOutcome {
        let result = backend.image_query(&self.upload).await;
        ImageOutcome { ticket: self.ticket, result }
    }
}

#[derive(Debug, Clone)]
pub struct ImageOutcome {
    ticket: Ticket,
    result: Result<QueryResponse, QueryError>,
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Debug, Clone)]
pub struct ChatController {
    messages: Vec<Message>,
    text: TextQuery,
    image: ImageQuery,
    visibility: Visibility,
    dropzone_open: bool,
    scroll_seq: u64,
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            text: TextQuery::new(QueryKind::Text),
            image: ImageQuery::new(QueryKind::Image),
            visibility: Visibility::default(),
            dropzone_open: false,
            scroll_seq: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Text path
    // -------------------------------------------------------------------------

    /// Submit a pasted error message. Blank input, or input while a text
    /// query is pending, is ignored.
    pub fn submit_text(&mut self, text: &str) -> Option<TextRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let ticket = self.text.begin()?;
        self.append(Message::user_text(trimmed, OffsetDateTime::now_utc()));
        Some(TextRequest { ticket, text: trimmed.to_string() })
    }

    /// Apply a text outcome. Returns `false` if it was stale and dropped.
    pub fn finish_text(&mut self, outcome: TextOutcome) -> bool {
        if !self.text.settle(outcome.ticket, &outcome.result) {
            return false;
        }
        let now = OffsetDateTime::now_utc();
        match outcome.result {
            Ok(bugs) => self.append(Message::response(MessageContent::Bugs(bugs), now)),
            Err(e) => self.append(Message::error(e.to_string(), now)),
        }
        true
    }

    /// Submit, run and finish a text query in one call. Returns `false` when
    /// the submission was ignored.
    pub async fn ask(&mut self, backend: &dyn QueryBackend, text: &str) -> bool {
        let Some(request) = self.submit_text(text) else {
            return false;
        };
        let outcome = request.run(backend).await;
        self.finish_text(outcome)
    }

    // -------------------------------------------------------------------------
    // Image path
    // -------------------------------------------------------------------------

    /// Submit dropped or selected files. Only the first file is used; an
    /// empty list, or a submission while an upload is pending, is ignored.
    pub fn submit_image(&mut self, files: Vec<ImageUpload>) -> Option<ImageRequest> {
        let upload = files.into_iter().next()?;
        let ticket = self.image.begin()?;
        self.append(Message::user_image(upload.image_ref(), OffsetDateTime::now_utc()));
        Some(ImageRequest { ticket, upload })
    }

    /// Apply an image outcome. On success the drop zone closes; on failure
    /// it stays as it was so the user can retry.
    pub fn finish_image(&mut self, outcome: ImageOutcome) -> bool {
        if !self.image.settle(outcome.ticket, &outcome.result) {
            return false;
        }
        let now = OffsetDateTime::now_utc();
        match outcome.result {
            Ok(response) => {
                self.append(Message::response(response.into(), now));
                self.dropzone_open = false;
            }
            Err(e) => self.append(Message::error(e.to_string(), now)),
        }
        true
    }

    /// Submit, run and finish an image query in one call.
    pub async fn send_image(&mut self, backend: &dyn QueryBackend, files: Vec<ImageUpload>) -> bool {
        let Some(request) = self.submit_image(files) else {
            return false;
        };
        let outcome = request.run(backend).await;
        self.finish_image(outcome)
    }

    pub fn toggle_dropzone(&mut self) {
        self.dropzone_open = !self.dropzone_open;
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn dispatch(&mut self, event: VisibilityEvent) -> Visibility {
        self.visibility = self.visibility.next(event);
        self.visibility
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_text_pending(&self) -> bool {
        self.text.is_pending()
    }

    #[must_use]
    pub fn is_image_pending(&self) -> bool {
        self.image.is_pending()
    }

    #[must_use]
    pub fn text_query(&self) -> &TextQuery {
        &self.text
    }

    #[must_use]
    pub fn image_query(&self) -> &ImageQuery {
        &self.image
    }

    #[must_use]
    pub fn dropzone_open(&self) -> bool {
        self.dropzone_open
    }

    /// Bumped on every append; a view scrolls to the newest message when it changes.
    #[must_use]
    pub fn scroll_seq(&self) -> u64 {
        self.scroll_seq
    }

    fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_seq += 1;
    }
}
