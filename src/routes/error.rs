//! JSON error responses.
//!
//! Every failure leaves the server as `{error: true, message, details?}`.
//! `details` carries raw error text and is only filled in outside production.

use std::any::Any;

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ErrorCode;

pub const NO_FILE_MESSAGE: &str = "No image file uploaded. Use 'image' as the field name.";
pub const NOT_AN_IMAGE_MESSAGE: &str = "Only image files are allowed";
pub const DUPLICATE_FILE_MESSAGE: &str = "Only one image file may be uploaded per request";
pub const UPSTREAM_MESSAGE: &str = "Failed to process image with AI";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{message}")]
    Upstream { message: String, details: Option<String> },
    #[error("Not found")]
    NotFound,
    #[error("Internal server error")]
    Internal { details: Option<String> },
}

impl ApiError {
    /// Upstream/integration failure; raw text kept only when `expose` is set.
    pub fn upstream(err: &impl std::fmt::Display, expose: bool) -> Self {
        Self::Upstream { message: UPSTREAM_MESSAGE.into(), details: expose.then(|| err.to_string()) }
    }

    /// Message for a file over `max_bytes`.
    #[must_use]
    pub fn too_large(max_bytes: usize) -> Self {
        Self::BadRequest(format!("File too large. Maximum size is {}MB", max_bytes / (1024 * 1024)))
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Self::Upstream { details, .. } | Self::Internal { details } => details.as_deref(),
            _ => None,
        }
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "E_BAD_REQUEST",
            Self::PayloadTooLarge(_) => "E_PAYLOAD_TOO_LARGE",
            Self::Upstream { .. } => "E_UPSTREAM",
            Self::NotFound => "E_NOT_FOUND",
            Self::Internal { .. } => "E_INTERNAL",
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(err.body_text())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            // Not multipart at all, so there is no file part to find.
            Self::BadRequest(NO_FILE_MESSAGE.into())
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: true, message: self.to_string(), details: self.details() };
        (self.status(), Json(body)).into_response()
    }
}

/// Catch-all for handler panics: generic 500 body, panic text as details
/// when `expose` is set.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, expose: bool) -> Response {
    let text = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %text, "handler panicked");
    ApiError::Internal { details: expose.then_some(text) }.into_response()
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
