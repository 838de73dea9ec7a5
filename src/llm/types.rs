//! LLM types: Gemini-facing request parts, responses, and errors.
//!
//! Provider-neutral enough that the relay pipeline only ever sees
//! [`GenAi`], never HTTP details, so tests can swap in a recording mock.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by AI client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// Reading the file to upload failed.
    #[error("file read failed: {0}")]
    FileRead(String),

    /// The HTTP request to the AI provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The AI provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The AI provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider answered but produced no text.
    #[error("AI response contained no text")]
    EmptyResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::FileRead(_) => "E_FILE_READ",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Handle to a file held by the provider's file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Opaque URI used to reference the file in generation requests.
    pub uri: String,
    /// Content type the provider recorded for the file.
    pub mime_type: String,
}

// =============================================================================
// CONTENT PARTS
// =============================================================================

/// One element of a generation request, in the order the model sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Reference to a previously uploaded file.
    File(RemoteFile),
    /// Plain instruction text.
    Text(String),
}

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate.
    pub text: String,
    pub finish_reason: Option<String>,
    pub prompt_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// GEN AI TRAIT
// =============================================================================

/// Async seam over the external AI service. Enables mocking in tests.
#[async_trait::async_trait]
pub trait GenAi: Send + Sync {
    /// Upload a local file to the provider's file store.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the file cannot be read or the upload fails.
    async fn upload_file(
        &self,
        path: &std::path::Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, LlmError>;

    /// Run one generation request over the ordered `parts`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is malformed,
    /// or it carries no text.
    async fn generate(&self, parts: &[Part]) -> Result<GenerateResponse, LlmError>;
}
