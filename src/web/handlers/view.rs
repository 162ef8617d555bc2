//! In-browser viewing: the viewer page and the raw inline content behind it.

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::{Html, Response},
};
use std::sync::Arc;

use super::files::{content_disposition_header, serve_file};
use crate::viewer;
use crate::web::error::WebError;
use crate::web::handlers::AppState;
use crate::web::templates::{render_html, FileRow, PreviewTemplate, ViewerTemplate};

/// GET /view/:filename - Viewer page, or an information page with a
/// download link when the type cannot be shown in the browser.
pub async fn view_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Html<String>, WebError> {
    let stored = state.storage.stat(&filename)?;
    let entry = viewer::dispatch(&stored.name);
    let row = FileRow::new(&stored, &state.timezone);

    if !entry.strategy.is_viewable() {
        return Ok(render_html(&PreviewTemplate { file: row })?);
    }

    let extension = viewer::extension_of(&stored.name).unwrap_or_default();
    Ok(render_html(&ViewerTemplate::new(row, entry.strategy, extension))?)
}

/// GET /render/:filename - File bytes served inline with their content type.
///
/// Formats that can carry script (HTML, SVG) are sandboxed so uploads
/// cannot run on this origin.
pub async fn render_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    req: Request,
) -> Result<Response, WebError> {
    let stored = state.storage.stat(&filename)?;
    let entry = viewer::dispatch(&stored.name);

    let mut response = serve_file(
        state.storage.file_path(&stored.name)?,
        req,
        entry.content_type,
        content_disposition_header("inline", &stored.name),
    )
    .await?;

    if entry.sandboxed {
        response.headers_mut().insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("sandbox"),
        );
    }

    Ok(response)
}
