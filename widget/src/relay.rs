//! HTTP backend talking to the relay server.
//!
//! Image queries go to `POST /process-image` as multipart with a single
//! `image` file part. The relay has no text search endpoint, so text queries
//! are answered by the wrapped [`MockBackend`].

#[cfg(test)]
#[path = "relay_test.rs"]
mod relay_test;

use std::time::Duration;

use serde::Deserialize;

use crate::backend::{ImageUpload, MockBackend, QueryBackend, QueryError, QueryResponse};
use crate::message::BugResult;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 180;
const IMAGE_FIELD: &str = "image";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessImageBody {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    ai_response: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct RelayBackend {
    http: reqwest::Client,
    base_url: String,
    fallback: MockBackend,
}

impl RelayBackend {
    /// Build a backend for the relay at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] if the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, QueryError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Build a backend with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] if the HTTP client fails to build.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback: MockBackend::new(),
        })
    }

    /// Replace the backend used for text queries.
    #[must_use]
    pub fn with_text_fallback(mut self, fallback: MockBackend) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the relay's liveness text.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the relay is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<String, QueryError> {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        if status != 200 {
            return Err(QueryError::Rejected { status, message: body });
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl QueryBackend for RelayBackend {
    async fn text_query(&self, text: &str) -> Result<Vec<BugResult>, QueryError> {
        self.fallback.text_query(text).await
    }

    async fn image_query(&self, image: &ImageUpload) -> Result<QueryResponse, QueryError> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http
            .post(format!("{}/process-image", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        parse_process_image(status, &body)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Interpret a `/process-image` reply.
///
/// # Errors
///
/// Non-2xx replies become [`QueryError::Rejected`] carrying the relay's
/// `message`; a blank `aiResponse` is [`QueryError::EmptyResponse`].
pub fn parse_process_image(status: u16, body: &str) -> Result<QueryResponse, QueryError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(QueryError::Rejected { status, message });
    }

    let parsed: ProcessImageBody =
        serde_json::from_str(body).map_err(|e| QueryError::MalformedResponse(e.to_string()))?;
    if parsed.error {
        return Err(QueryError::Rejected {
            status,
            message: parsed.message.unwrap_or_else(|| "request failed".into()),
        });
    }

    match parsed.ai_response {
        Some(text) if !text.trim().is_empty() => Ok(QueryResponse::Text(text)),
        _ => Err(QueryError::EmptyResponse),
    }
}
