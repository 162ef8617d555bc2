//! File storage for filebox.
//!
//! Uploaded files live flat in a single directory under their sanitized
//! base name:
//! ```text
//! {base_path}/
//! ├── notes.txt
//! ├── photo.png
//! └── ...
//! ```
//! The directory is the only record of which files exist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::StoredFile;
use crate::datetime::from_system_time;
use crate::{FileboxError, Result};

/// Reduce a client-supplied name to its final path component.
///
/// Both `/` and `\` count as separators. Names that are empty, `.` or `..`
/// after reduction are rejected, as is any name containing a NUL byte.
pub fn sanitize_filename(raw: &str) -> Result<String> {
    if raw.contains('\0') {
        return Err(FileboxError::Validation(format!(
            "invalid filename: {raw:?}"
        )));
    }

    let base = raw
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("");

    match base {
        "" | "." | ".." => Err(FileboxError::Validation(format!(
            "invalid filename: {raw:?}"
        ))),
        name => Ok(name.to_string()),
    }
}

/// Storage accessor for the upload directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the on-disk path for a client-supplied name.
    pub fn file_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.base_path.join(sanitize_filename(name)?))
    }

    /// List stored files sorted by name.
    ///
    /// Directories are skipped, as are entries whose metadata cannot be read.
    pub fn list(&self) -> Result<Vec<StoredFile>> {
        fs::create_dir_all(&self.base_path)?;

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if metadata.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let modified = match metadata.modified() {
                Ok(t) => from_system_time(t),
                Err(_) => continue,
            };

            files.push(StoredFile {
                name,
                size: metadata.len(),
                modified,
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Save content under the sanitized form of `name`.
    ///
    /// An existing file with the same name is overwritten.
    pub fn save(&self, name: &str, content: &[u8]) -> Result<StoredFile> {
        let name = sanitize_filename(name)?;
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.base_path.join(&name), content)?;
        self.stat(&name)
    }

    /// Get metadata for a stored file.
    pub fn stat(&self, name: &str) -> Result<StoredFile> {
        let name = sanitize_filename(name)?;
        let file_path = self.base_path.join(&name);

        let metadata = match fs::metadata(&file_path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(FileboxError::NotFound(format!("File: {name}"))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FileboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(StoredFile {
            size: metadata.len(),
            modified: from_system_time(metadata.modified()?),
            name,
        })
    }

    /// Load content from storage.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let stored = self.stat(name)?;

        match fs::read(self.base_path.join(&stored.name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound(format!("File: {}", stored.name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage.
    ///
    /// # Returns
    ///
    /// `true` if the file was deleted, `false` if it didn't exist
    pub fn delete(&self, name: &str) -> Result<bool> {
        let file_path = self.file_path(name)?;
        if file_path.is_dir() {
            return Ok(false);
        }

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).map(|p| p.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("uploads")).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("nested").join("uploads");

        assert!(!storage_path.exists());

        let storage = FileStorage::new(&storage_path).unwrap();

        assert!(storage_path.is_dir());
        assert_eq!(storage.base_path(), storage_path);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("notes.txt").unwrap(), "notes.txt");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("/abs/path/a.pdf").unwrap(), "a.pdf");
        assert_eq!(sanitize_filename("C:\\Users\\me\\cv.doc").unwrap(), "cv.doc");
        assert_eq!(sanitize_filename("dir/").unwrap(), "dir");
        assert_eq!(sanitize_filename(".hidden").unwrap(), ".hidden");
    }

    #[test]
    fn test_sanitize_filename_rejects_empty_and_dots() {
        for raw in ["", ".", "..", "/", "a/..", "../", "\\", "a\0b.txt", "\0/ok.txt"] {
            assert!(
                matches!(sanitize_filename(raw), Err(FileboxError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = setup_storage();
        let content = b"Hello, World!";

        let stored = storage.save("hello.txt", content).unwrap();

        assert_eq!(stored.name, "hello.txt");
        assert_eq!(stored.size, content.len() as u64);
        assert_eq!(storage.load("hello.txt").unwrap(), content);
    }

    #[test]
    fn test_save_strips_directories() {
        let (temp_dir, storage) = setup_storage();

        let stored = storage.save("../escape.txt", b"data").unwrap();

        assert_eq!(stored.name, "escape.txt");
        assert!(storage.base_path().join("escape.txt").exists());
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("a.txt", b"first version").unwrap();
        let stored = storage.save("a.txt", b"second").unwrap();

        assert_eq!(stored.size, 6);
        assert_eq!(storage.load("a.txt").unwrap(), b"second");
    }

    #[test]
    fn test_save_recreates_missing_directory() {
        let (_temp_dir, storage) = setup_storage();
        fs::remove_dir_all(storage.base_path()).unwrap();

        storage.save("a.txt", b"x").unwrap();

        assert!(storage.exists("a.txt"));
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.load("nonexistent.txt");

        assert!(matches!(result, Err(FileboxError::NotFound(_))));
    }

    #[test]
    fn test_stat_directory_is_not_found() {
        let (_temp_dir, storage) = setup_storage();
        fs::create_dir(storage.base_path().join("subdir")).unwrap();

        assert!(matches!(
            storage.stat("subdir"),
            Err(FileboxError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_skips_directories_and_sorts() {
        let (_temp_dir, storage) = setup_storage();
        storage.save("b.txt", b"bb").unwrap();
        storage.save("a.txt", b"a").unwrap();
        fs::create_dir(storage.base_path().join("subdir")).unwrap();

        let files = storage.list().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(files[0].size, 1);
        assert_eq!(files[1].size, 2);
    }

    #[test]
    fn test_list_empty() {
        let (_temp_dir, storage) = setup_storage();
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("delete.txt", b"to delete").unwrap();
        assert!(storage.exists("delete.txt"));

        assert!(storage.delete("delete.txt").unwrap());
        assert!(!storage.exists("delete.txt"));
        assert!(!storage.delete("delete.txt").unwrap());
    }

    #[test]
    fn test_delete_never_touches_directories() {
        let (_temp_dir, storage) = setup_storage();
        fs::create_dir(storage.base_path().join("keep")).unwrap();

        assert!(!storage.delete("keep").unwrap());
        assert!(storage.base_path().join("keep").is_dir());
    }

    #[test]
    fn test_delete_invalid_name() {
        let (_temp_dir, storage) = setup_storage();
        assert!(matches!(
            storage.delete(".."),
            Err(FileboxError::Validation(_))
        ));
    }

    #[test]
    fn test_binary_content() {
        let (_temp_dir, storage) = setup_storage();
        let content: Vec<u8> = (0..=255).collect();

        storage.save("binary.bin", &content).unwrap();

        assert_eq!(storage.load("binary.bin").unwrap(), content);
    }

    #[test]
    fn test_unicode_name() {
        let (_temp_dir, storage) = setup_storage();

        let stored = storage.save("日本語ファイル.txt", b"data").unwrap();

        assert_eq!(stored.name, "日本語ファイル.txt");
        assert_eq!(storage.list().unwrap()[0].name, "日本語ファイル.txt");
    }
}
