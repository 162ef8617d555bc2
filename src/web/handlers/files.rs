//! File handlers: upload, list, download, delete.

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, Request, State},
    http::{header, HeaderValue},
    response::{Html, Redirect, Response},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;
use tower_http::services::ServeFile;

use crate::file::sanitize_filename;
use crate::web::error::WebError;
use crate::web::handlers::AppState;
use crate::web::templates::{render_html, FileListTemplate, FileRow};

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

const INVALID_FORM: &str = "File too large or invalid form data";
const MISSING_FILE: &str = "Error retrieving file";

/// Generate a safe Content-Disposition header value.
///
/// `disposition` is `attachment` or `inline`. Control characters are
/// removed, quotes and backslashes replaced in the plain `filename`
/// parameter, and RFC 5987 `filename*` is added for anything that is not
/// plain ASCII.
pub fn content_disposition_header(disposition: &str, filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("{disposition}; filename=\"{filename}\"");
    }

    let encoded = urlencoding::encode(filename);
    format!("{disposition}; filename=\"{sanitized}\"; filename*=UTF-8''{encoded}")
}

/// Serve a file from disk with the given content type and disposition.
///
/// `ServeFile` answers `Range` requests (206), advertises `Accept-Ranges`
/// and handles `Last-Modified` conditional GETs. The type and disposition
/// it would pick are replaced on successful responses.
pub(crate) async fn serve_file(
    path: PathBuf,
    req: Request,
    content_type: &'static str,
    disposition: String,
) -> Result<Response, WebError> {
    let disposition = HeaderValue::try_from(disposition).map_err(|e| {
        tracing::error!("Invalid Content-Disposition value: {}", e);
        WebError::internal("Failed to build response")
    })?;

    let response = ServeFile::new(path)
        .oneshot(req)
        .await
        .unwrap_or_else(|never| match never {});
    let mut response = response.map(Body::new);

    if response.status().is_success() {
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}

/// POST /upload - Store the `file` field of a multipart form.
///
/// Redirects to the file list on success.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, WebError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected upload request: {}", e);
        WebError::bad_request(INVALID_FORM)
    })?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        WebError::bad_request(INVALID_FORM)
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| WebError::bad_request(MISSING_FILE))?;
        let content = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read file content: {}", e);
            WebError::bad_request(INVALID_FORM)
        })?;

        upload = Some((filename, content));
        break;
    }

    let (filename, content) = upload.ok_or_else(|| WebError::bad_request(MISSING_FILE))?;

    if content.len() as u64 > state.max_upload_size {
        return Err(WebError::bad_request(INVALID_FORM));
    }

    let stored = state.storage.save(&filename, &content)?;
    tracing::info!(file = %stored.name, size = stored.size, "File uploaded");

    Ok(Redirect::to("/files"))
}

/// GET /files - List uploaded files.
pub async fn list_files(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let files = state.storage.list()?;
    let rows = files
        .iter()
        .map(|f| FileRow::new(f, &state.timezone))
        .collect();

    Ok(render_html(&FileListTemplate { files: rows })?)
}

/// GET /download/:filename - Download a file as an attachment.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    req: Request,
) -> Result<Response, WebError> {
    let stored = state.storage.stat(&filename)?;

    serve_file(
        state.storage.file_path(&stored.name)?,
        req,
        "application/octet-stream",
        content_disposition_header("attachment", &stored.name),
    )
    .await
}

/// GET /delete/:filename - Delete a file, then return to the list.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Redirect, WebError> {
    let name = sanitize_filename(&filename)?;

    if !state.storage.delete(&name)? {
        return Err(WebError::not_found("File not found"));
    }
    tracing::info!(file = %name, "File deleted");

    Ok(Redirect::to("/files"))
}
