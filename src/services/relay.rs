//! Relay service: stored image plus bug catalog in, AI answer out.
//!
//! DESIGN
//! ======
//! One pass, no retries: persist the upload under a scoped guard, push it to
//! the provider's file store, run a single generation over
//! `[file, catalog instruction]`, and hand back the text. The guard is dropped
//! on every exit path, removing the local copy.
//!
//! [`spawn_process_image`] runs the pipeline on its own task so that a client
//! hanging up mid-request does not cancel upstream calls already in flight.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::{LlmError, Part};
use crate::services::upload::{TempUpload, UploadedImage};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("failed to store upload: {0}")]
    Store(#[from] std::io::Error),
    #[error(transparent)]
    Ai(#[from] LlmError),
    #[error("relay task aborted: {0}")]
    Aborted(String),
}

impl ErrorCode for RelayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(_) => "E_UPLOAD_STORE",
            Self::Ai(e) => e.error_code(),
            Self::Aborted(_) => "E_RELAY_ABORTED",
        }
    }
}

/// Metadata echoed back to the client; mirrors what it sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub name: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    pub image: ImageSummary,
    pub ai_response: String,
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Store, upload, and generate for one image.
///
/// # Errors
///
/// Returns [`RelayError::Store`] when the local write fails and
/// [`RelayError::Ai`] for any provider failure, including an answer with no text.
pub async fn process_image(state: &AppState, image: UploadedImage) -> Result<RelayOutcome, RelayError> {
    let summary = ImageSummary {
        name: image.original_name.clone(),
        size: image.size_bytes(),
        mime_type: image.mime_type.clone(),
    };
    info!(name = %summary.name, size = summary.size, mime = %summary.mime_type, "processing image");

    let stored = TempUpload::persist(&state.config.upload_dir, &image).await?;
    drop(image);

    let remote = state
        .ai
        .upload_file(stored.path(), &summary.mime_type, &summary.name)
        .await?;
    info!(uri = %remote.uri, "image uploaded to file store");

    let parts = [Part::File(remote), Part::Text(state.catalog.instruction())];
    let response = state.ai.generate(&parts).await?;
    info!(
        prompt_tokens = response.prompt_tokens,
        output_tokens = response.output_tokens,
        finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
        "AI response received"
    );

    Ok(RelayOutcome { image: summary, ai_response: response.text })
}

/// Run [`process_image`] on a detached task and wait for it.
///
/// # Errors
///
/// Propagates the pipeline error, or [`RelayError::Aborted`] if the task panicked.
pub async fn spawn_process_image(state: AppState, image: UploadedImage) -> Result<RelayOutcome, RelayError> {
    let handle = tokio::spawn(async move { process_image(&state, image).await });
    let result = match handle.await {
        Ok(result) => result,
        Err(e) => Err(RelayError::Aborted(e.to_string())),
    };
    if let Err(e) = &result {
        warn!(code = e.error_code(), error = %e, "image relay failed");
    }
    result
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
