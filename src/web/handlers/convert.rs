//! Text-to-PDF conversion handler.

use axum::{
    extract::{Path, Request, State},
    response::Response,
};
use std::sync::Arc;

use super::files::{content_disposition_header, serve_file};
use crate::file::sanitize_filename;
use crate::web::error::WebError;
use crate::web::handlers::AppState;

/// GET /convert/:filename - Convert a stored text file to PDF and show it.
///
/// The PDF is kept in the conversion directory as `<filename>.pdf`.
pub async fn convert_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    req: Request,
) -> Result<Response, WebError> {
    let name = sanitize_filename(&filename)?;
    if !state.storage.exists(&name) {
        return Err(WebError::not_found("File not found"));
    }

    let source = state.storage.file_path(&name)?;
    let converter = state.converter.clone();
    let document = tokio::task::spawn_blocking(move || converter.convert(&source, &name))
        .await
        .map_err(|e| {
            tracing::error!("PDF conversion task panicked: {}", e);
            WebError::internal("PDF conversion failed")
        })??;

    tracing::info!(
        source = %document.source_name,
        output = %document.path.display(),
        pages = document.pages,
        rows = document.rows,
        "File converted"
    );

    serve_file(
        document.path,
        req,
        "application/pdf",
        content_disposition_header("inline", &document.name),
    )
    .await
}
