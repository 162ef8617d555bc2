//! filebox - a small file upload, preview and conversion service.
//!
//! Files are kept flat in an upload directory; plain-text files can be
//! converted to PDF into a separate directory.

pub mod config;
pub mod convert;
pub mod datetime;
pub mod error;
pub mod file;
pub mod logging;
pub mod viewer;
pub mod web;

pub use config::Config;
pub use convert::{ConvertedDocument, Converter};
pub use error::{FileboxError, Result};
pub use file::{FileStorage, StoredFile};
pub use viewer::{ViewEntry, ViewStrategy};
pub use web::{AppState, WebServer};
