//! Static pages: home and upload form.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::file::format_file_size;
use crate::web::error::WebError;
use crate::web::handlers::AppState;
use crate::web::templates::{render_html, HomeTemplate, UploadFormTemplate};

/// GET / - Landing page.
pub async fn home() -> Result<Html<String>, WebError> {
    Ok(render_html(&HomeTemplate)?)
}

/// GET /upload-form - Multipart upload form.
pub async fn upload_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    Ok(render_html(&UploadFormTemplate {
        max_upload_size: format_file_size(state.max_upload_size),
    })?)
}
