//! Route definitions for the REST API.

mod health;
mod outlines;
mod samples;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config().max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Samples
        .route(
            "/api/upload-sample",
            post(samples::upload_sample).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/samples", get(samples::list_samples))
        .route("/api/samples/:id", get(samples::get_sample))
        // Outlines
        .route("/api/generate-outline", post(outlines::generate_outline))
        .route("/api/outlines/:id", get(outlines::get_outline))
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use outlines::*;
pub use samples::*;
