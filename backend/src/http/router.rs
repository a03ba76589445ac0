//! Router configuration for the HTTP server.
//!
//! This module sets up all routes and middleware (compression, tracing,
//! upload size limit) and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::upload_form))
        .route("/visualize", post(handlers::visualize))
        .route("/health", get(handlers::health_check))
        // Spreadsheets are read fully into memory.
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
