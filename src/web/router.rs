//! Router configuration for the web interface.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    convert_file, delete_file, download_file, home, list_files, render_file, upload_file,
    upload_form, view_file, AppState,
};
use super::middleware::security_headers;

/// Create the main router.
///
/// The upload route's body limit follows `AppState::max_upload_size`.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let upload_limit = usize::try_from(app_state.max_upload_size).unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(home))
        .route("/upload-form", get(upload_form))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/files", get(list_files))
        .route("/download/:filename", get(download_file))
        .route("/delete/:filename", get(delete_file))
        .route("/convert/:filename", get(convert_file))
        .route("/view/:filename", get(view_file))
        .route("/render/:filename", get(render_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
