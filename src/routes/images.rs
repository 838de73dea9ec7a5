//! `POST /process-image`: multipart intake and AI relay.
//!
//! Intake accepts one file part named `image` with an `image/*` content type
//! and at most `max_image_bytes` bytes. Anything else is rejected with a 400
//! before the relay pipeline (and therefore the AI service) is touched.

use axum::Json;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::warn;

use super::error::{ApiError, DUPLICATE_FILE_MESSAGE, NO_FILE_MESSAGE, NOT_AN_IMAGE_MESSAGE};
use crate::error::ErrorCode;
use crate::services::relay::{self, ImageSummary};
use crate::services::upload::UploadedImage;
use crate::state::AppState;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageResponse {
    pub error: bool,
    pub image: ImageSummary,
    pub ai_response: String,
}

/// `POST /process-image`: relay one uploaded image to the AI service.
pub async fn process_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessImageResponse>, ApiError> {
    let mut multipart = multipart.inspect_err(|r| warn!(reason = %r.body_text(), "not a multipart request"))?;

    let image = match read_image(&mut multipart, state.config.max_image_bytes).await {
        Ok(image) => image,
        Err(e) => {
            warn!(code = e.error_code(), reason = %e, "image intake rejected");
            drain(&mut multipart).await;
            return Err(e);
        }
    };

    let expose = state.config.expose_error_details();
    let outcome = relay::spawn_process_image(state, image)
        .await
        .map_err(|e| ApiError::upstream(&e, expose))?;

    Ok(Json(ProcessImageResponse { error: false, image: outcome.image, ai_response: outcome.ai_response }))
}

/// Pull the single image part out of the request.
async fn read_image(multipart: &mut Multipart, max_bytes: usize) -> Result<UploadedImage, ApiError> {
    let mut found: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            continue;
        }
        if found.is_some() {
            return Err(ApiError::BadRequest(DUPLICATE_FILE_MESSAGE.into()));
        }

        let mime_type = part_content_type(&field);
        if !is_image_mime(&mime_type) {
            return Err(ApiError::BadRequest(NOT_AN_IMAGE_MESSAGE.into()));
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = read_limited(field, max_bytes).await?;

        found = Some(UploadedImage { original_name, mime_type, bytes });
    }

    found.ok_or_else(|| ApiError::BadRequest(NO_FILE_MESSAGE.into()))
}

/// The part's `Content-Type` exactly as the client sent it. The parsed
/// `content_type()` is case-folded, so read the raw header.
fn part_content_type(field: &Field<'_>) -> String {
    field
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .or_else(|| field.content_type())
        .unwrap_or_default()
        .trim()
        .to_string()
}

async fn read_limited(mut field: Field<'_>, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ApiError::too_large(max_bytes));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Read and discard the rest of the request so the client gets the
/// rejection instead of a reset connection. Bounded by the router body limit.
async fn drain(multipart: &mut Multipart) {
    while let Ok(Some(mut field)) = multipart.next_field().await {
        while let Ok(Some(_)) = field.chunk().await {}
    }
}

/// `image/<subtype>` with a non-empty subtype, compared case-insensitively.
#[must_use]
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|sub| !sub.trim().is_empty())
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
