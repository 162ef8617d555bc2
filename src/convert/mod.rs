//! Text-to-PDF conversion for filebox.
//!
//! Each line of a text file becomes one PDF text row. Converted documents
//! are written to their own directory as `<original>.pdf` and are not
//! removed when the source file is deleted.

mod layout;
mod pdf;

pub use layout::PageLayout;
pub use pdf::{encode_win_ansi, render_pdf, RenderedPdf};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::file::sanitize_filename;
use crate::{FileboxError, Result};

/// A PDF derived from a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    /// Name of the source file.
    pub source_name: String,
    /// Name of the PDF (`<source_name>.pdf`).
    pub name: String,
    /// Location of the PDF on disk.
    pub path: PathBuf,
    pub pages: usize,
    /// Text rows written, one per source line.
    pub rows: usize,
}

/// Converts text files into PDF documents in an output directory.
#[derive(Debug, Clone)]
pub struct Converter {
    output_dir: PathBuf,
    layout: PageLayout,
}

impl Converter {
    /// Create a converter writing into `output_dir` (created if missing).
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            layout: PageLayout::default(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Name of the PDF produced for `source_name`.
    pub fn output_name(source_name: &str) -> Result<String> {
        Ok(format!("{}.pdf", sanitize_filename(source_name)?))
    }

    /// Path of the PDF produced for `source_name`.
    pub fn output_path(&self, source_name: &str) -> Result<PathBuf> {
        Ok(self.output_dir.join(Self::output_name(source_name)?))
    }

    /// Convert the text file at `source` into `<source_name>.pdf`.
    ///
    /// Invalid UTF-8 is decoded lossily. The PDF is written under a
    /// temporary name and renamed into place, replacing any earlier
    /// conversion of the same file.
    pub fn convert(&self, source: &Path, source_name: &str) -> Result<ConvertedDocument> {
        let source_name = sanitize_filename(source_name)?;
        let name = Self::output_name(&source_name)?;

        let raw = match fs::read(source) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FileboxError::NotFound(format!("File: {source_name}")))
            }
            Err(e) => return Err(e.into()),
        };
        let text = String::from_utf8_lossy(&raw);
        let rendered = render_pdf(&text, &self.layout)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&name);
        let temp_path = self.output_dir.join(format!(".{name}.{}.tmp", Uuid::new_v4()));

        let written =
            fs::write(&temp_path, &rendered.bytes).and_then(|()| fs::rename(&temp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(
            source = %source_name,
            pages = rendered.pages,
            rows = rendered.rows,
            "Rendered PDF"
        );

        Ok(ConvertedDocument {
            source_name,
            name,
            path,
            pages: rendered.pages,
            rows: rendered.rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Converter) {
        let temp_dir = TempDir::new().unwrap();
        let converter = Converter::new(temp_dir.path().join("conversions")).unwrap();
        (temp_dir, converter)
    }

    #[test]
    fn test_new_creates_output_dir() {
        let (temp_dir, converter) = setup();
        assert!(temp_dir.path().join("conversions").is_dir());
        assert_eq!(converter.output_dir(), temp_dir.path().join("conversions"));
    }

    #[test]
    fn test_output_name() {
        assert_eq!(Converter::output_name("notes.txt").unwrap(), "notes.txt.pdf");
        assert_eq!(Converter::output_name("../x/notes.txt").unwrap(), "notes.txt.pdf");
        assert!(Converter::output_name("..").is_err());
    }

    #[test]
    fn test_convert_writes_pdf() {
        let (temp_dir, converter) = setup();
        let source = temp_dir.path().join("notes.txt");
        fs::write(&source, "one\ntwo\nthree\nfour\n").unwrap();

        let doc = converter.convert(&source, "notes.txt").unwrap();

        assert_eq!(doc.source_name, "notes.txt");
        assert_eq!(doc.name, "notes.txt.pdf");
        assert_eq!(doc.rows, 4);
        assert_eq!(doc.pages, 1);
        assert_eq!(doc.path, converter.output_path("notes.txt").unwrap());
        let bytes = fs::read(&doc.path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_convert_leaves_no_temp_files() {
        let (temp_dir, converter) = setup();
        let source = temp_dir.path().join("a.txt");
        fs::write(&source, "a").unwrap();

        converter.convert(&source, "a.txt").unwrap();
        converter.convert(&source, "a.txt").unwrap();

        let names: Vec<_> = fs::read_dir(converter.output_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt.pdf".to_string()]);
    }

    #[test]
    fn test_convert_invalid_utf8() {
        let (temp_dir, converter) = setup();
        let source = temp_dir.path().join("latin1.txt");
        fs::write(&source, [b'c', b'a', b'f', 0xE9, b'\n', b'x']).unwrap();

        let doc = converter.convert(&source, "latin1.txt").unwrap();

        assert_eq!(doc.rows, 2);
    }

    #[test]
    fn test_convert_missing_source() {
        let (temp_dir, converter) = setup();

        let result = converter.convert(&temp_dir.path().join("missing.txt"), "missing.txt");

        assert!(matches!(result, Err(FileboxError::NotFound(_))));
    }
}
