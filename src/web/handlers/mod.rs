//! Request handlers for the web interface.

pub mod convert;
pub mod files;
pub mod pages;
pub mod view;

pub use convert::*;
pub use files::*;
pub use pages::*;
pub use view::*;

use crate::config::{ServerConfig, StorageConfig};
use crate::convert::Converter;
use crate::file::FileStorage;
use crate::Result;

/// Default maximum upload size (10MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// Shared application state.
///
/// Holds no file data: every request goes back to the filesystem.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upload directory accessor.
    pub storage: FileStorage,
    /// Text-to-PDF converter.
    pub converter: Converter,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
    /// Timezone for displayed modification times.
    pub timezone: String,
}

impl AppState {
    pub fn new(storage: FileStorage, converter: Converter) -> Self {
        Self {
            storage,
            converter,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            timezone: "UTC".to_string(),
        }
    }

    /// Build the state from configuration, creating both directories.
    pub fn from_config(storage: &StorageConfig, server: &ServerConfig) -> Result<Self> {
        let state = Self::new(
            FileStorage::new(&storage.upload_dir)?,
            Converter::new(&storage.conversion_dir)?,
        )
        .with_max_upload_size(storage.max_upload_size_bytes())
        .with_timezone(&server.timezone);

        tracing::info!(
            upload_dir = %storage.upload_dir,
            conversion_dir = %storage.conversion_dir,
            "File storage initialized"
        );
        Ok(state)
    }

    pub fn with_max_upload_size(mut self, bytes: u64) -> Self {
        self.max_upload_size = bytes;
        self
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.to_string();
        self
    }
}
