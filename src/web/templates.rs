//! HTML page templates.
//!
//! Templates live in `templates/` and are compiled in by askama; values are
//! HTML-escaped unless marked `safe` (only percent-encoded URLs are).

use askama::Template;
use axum::response::Html;

use crate::file::StoredFile;
use crate::viewer::ViewStrategy;
use crate::Result;

/// Render a template into an HTML response body.
pub fn render_html<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

/// Display data for one stored file.
#[derive(Debug, Clone)]
pub struct FileRow {
    pub name: String,
    pub size: String,
    pub modified: String,
    pub download_url: String,
    pub view_url: String,
    pub render_url: String,
    pub delete_url: String,
    pub convert_url: String,
}

impl FileRow {
    pub fn new(file: &StoredFile, timezone: &str) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size_formatted(),
            modified: file.modified_formatted(timezone),
            download_url: file.download_url(),
            view_url: file.view_url(),
            render_url: file.render_url(),
            delete_url: file.delete_url(),
            convert_url: file.convert_url(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

#[derive(Template)]
#[template(path = "upload_form.html")]
pub struct UploadFormTemplate {
    /// Human-readable upload limit.
    pub max_upload_size: String,
}

#[derive(Template)]
#[template(path = "files.html")]
pub struct FileListTemplate {
    pub files: Vec<FileRow>,
}

/// Viewer page for files the browser can display.
#[derive(Template)]
#[template(path = "viewer.html")]
pub struct ViewerTemplate {
    pub file: FileRow,
    pub view_type: &'static str,
    /// Lowercased extension, used for the media `type` attribute.
    pub extension: String,
}

impl ViewerTemplate {
    pub fn new(file: FileRow, strategy: ViewStrategy, extension: String) -> Self {
        Self {
            file,
            view_type: strategy.as_str(),
            extension,
        }
    }
}

/// Information page for files that can only be downloaded.
#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub file: FileRow,
}
