//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One real endpoint (`POST /process-image`) plus a plain-text liveness
//! route. Layers, outermost first: panic catch-all, request tracing, CORS for
//! the browser widget, and the request body limit.

pub mod error;
pub mod images;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use error::ApiError;

pub const LIVENESS_TEXT: &str = "Image Processing API is running. Use POST /process-image to upload and process an image.";

/// Whole-request cap as a multiple of the image limit. Leaves room to read
/// past an oversized part and still answer with a clean 400.
const BODY_LIMIT_FACTOR: usize = 4;

/// Build the relay router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.max_image_bytes.saturating_mul(BODY_LIMIT_FACTOR);
    let expose = state.config.expose_error_details();

    Router::new()
        .route("/", get(liveness))
        .route("/healthz", get(healthz))
        .route("/process-image", post(images::process_image))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn std::any::Any + Send + 'static>| {
            error::panic_response(panic, expose)
        }))
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
