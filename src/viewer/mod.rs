//! Viewer dispatch for filebox.
//!
//! Maps a file extension to the content type used when serving the file
//! inline and to the way the viewer page embeds it. The mapping is a static
//! table; unknown extensions are download-only.

use std::path::Path;

/// How the viewer page presents a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStrategy {
    /// PDF document in an iframe.
    Pdf,
    /// Plain text in an iframe.
    Text,
    /// HTML document in an iframe.
    Html,
    /// `<img>` tag.
    Image,
    /// `<video>` tag.
    Video,
    /// `<audio>` tag.
    Audio,
    /// Not viewable in the browser; offer a download instead.
    DownloadOnly,
}

impl ViewStrategy {
    /// Whether the viewer page can show the file in-browser.
    pub fn is_viewable(&self) -> bool {
        !matches!(self, ViewStrategy::DownloadOnly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewStrategy::Pdf => "pdf",
            ViewStrategy::Text => "text",
            ViewStrategy::Html => "html",
            ViewStrategy::Image => "image",
            ViewStrategy::Video => "video",
            ViewStrategy::Audio => "audio",
            ViewStrategy::DownloadOnly => "download",
        }
    }
}

impl std::fmt::Display for ViewStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type and strategy for one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry {
    pub content_type: &'static str,
    pub strategy: ViewStrategy,
    /// The format can carry script; inline renders must be sandboxed.
    pub sandboxed: bool,
}

const fn entry(content_type: &'static str, strategy: ViewStrategy) -> ViewEntry {
    ViewEntry {
        content_type,
        strategy,
        sandboxed: false,
    }
}

const fn scripted(content_type: &'static str, strategy: ViewStrategy) -> ViewEntry {
    ViewEntry {
        sandboxed: true,
        ..entry(content_type, strategy)
    }
}

/// Content type served for files with no table entry.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const DOWNLOAD_ONLY: ViewEntry = entry(FALLBACK_CONTENT_TYPE, ViewStrategy::DownloadOnly);

/// Lowercase extension → (content type, strategy, sandboxed).
static VIEW_TABLE: &[(&str, ViewEntry)] = &[
    ("pdf", entry("application/pdf", ViewStrategy::Pdf)),
    ("txt", entry("text/plain; charset=utf-8", ViewStrategy::Text)),
    ("log", entry("text/plain; charset=utf-8", ViewStrategy::Text)),
    ("md", entry("text/plain; charset=utf-8", ViewStrategy::Text)),
    ("json", entry("application/json", ViewStrategy::Text)),
    ("xml", entry("application/xml", ViewStrategy::Text)),
    ("csv", entry("text/csv", ViewStrategy::Text)),
    ("html", scripted("text/html; charset=utf-8", ViewStrategy::Html)),
    ("htm", scripted("text/html; charset=utf-8", ViewStrategy::Html)),
    ("jpg", entry("image/jpeg", ViewStrategy::Image)),
    ("jpeg", entry("image/jpeg", ViewStrategy::Image)),
    ("png", entry("image/png", ViewStrategy::Image)),
    ("gif", entry("image/gif", ViewStrategy::Image)),
    ("svg", scripted("image/svg+xml", ViewStrategy::Image)),
    ("mp4", entry("video/mp4", ViewStrategy::Video)),
    ("webm", entry("video/webm", ViewStrategy::Video)),
    ("mp3", entry("audio/mpeg", ViewStrategy::Audio)),
    ("wav", entry("audio/wav", ViewStrategy::Audio)),
];

/// Lowercased extension of `filename` without the dot.
///
/// Dot-files such as `.bashrc` and names without a dot have no extension.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Look up the table entry for an already lowercased extension.
pub fn lookup(extension: &str) -> ViewEntry {
    VIEW_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, entry)| *entry)
        .unwrap_or(DOWNLOAD_ONLY)
}

/// Decide how to serve and present `filename`.
pub fn dispatch(filename: &str) -> ViewEntry {
    extension_of(filename)
        .map(|ext| lookup(&ext))
        .unwrap_or(DOWNLOAD_ONLY)
}
