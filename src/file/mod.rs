//! File management module for filebox.
//!
//! This module provides the storage accessor for uploaded files:
//! - Filename sanitizing (base name only)
//! - Directory listing with size and modification metadata
//! - Save, load, and delete operations

mod storage;

pub use storage::{sanitize_filename, FileStorage};

use chrono::{DateTime, Utc};

use crate::datetime::format_modified;

/// An uploaded file, tracked only by its presence in the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Sanitized base filename.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

impl StoredFile {
    /// Human-readable size (see [`format_file_size`]).
    pub fn size_formatted(&self) -> String {
        format_file_size(self.size)
    }

    /// Modification time formatted for display in `timezone`.
    pub fn modified_formatted(&self, timezone: &str) -> String {
        format_modified(&self.modified, timezone)
    }

    /// Percent-encoded name, safe to use as a single URL path segment.
    pub fn url_segment(&self) -> String {
        urlencoding::encode(&self.name).into_owned()
    }

    pub fn download_url(&self) -> String {
        format!("/download/{}", self.url_segment())
    }

    pub fn view_url(&self) -> String {
        format!("/view/{}", self.url_segment())
    }

    pub fn render_url(&self) -> String {
        format!("/render/{}", self.url_segment())
    }

    pub fn delete_url(&self) -> String {
        format!("/delete/{}", self.url_segment())
    }

    pub fn convert_url(&self) -> String {
        format!("/convert/{}", self.url_segment())
    }
}

/// Format a byte count using binary units.
///
/// Sizes below 1024 are shown in bytes, larger ones with one decimal
/// and the largest unit that keeps the value below 1024.
pub fn format_file_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(name: &str) -> StoredFile {
        StoredFile {
            name: name.to_string(),
            size: 2048,
            modified: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_file_size_bytes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_file_size(u64::MAX), "16.0 EB");
    }

    #[test]
    fn test_urls() {
        let file = sample("notes.txt");
        assert_eq!(file.download_url(), "/download/notes.txt");
        assert_eq!(file.view_url(), "/view/notes.txt");
        assert_eq!(file.render_url(), "/render/notes.txt");
        assert_eq!(file.delete_url(), "/delete/notes.txt");
        assert_eq!(file.convert_url(), "/convert/notes.txt");
    }

    #[test]
    fn test_urls_are_percent_encoded() {
        let file = sample("my report #1.txt");
        assert_eq!(file.download_url(), "/download/my%20report%20%231.txt");
    }

    #[test]
    fn test_formatted_fields() {
        let file = sample("a.bin");
        assert_eq!(file.size_formatted(), "2.0 KB");
        assert_eq!(file.modified_formatted("UTC"), "2024-03-01 08:00:00");
    }
}
