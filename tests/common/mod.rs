//! Test helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use tempfile::TempDir;

use filebox::convert::Converter;
use filebox::file::FileStorage;
use filebox::web::{create_router, AppState};

/// A router under test plus the directories backing it.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn upload_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("uploads")
    }

    pub fn conversion_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("conversions")
    }

    /// POST a single file to /upload.
    pub async fn upload(&self, name: &str, content: &[u8]) -> TestResponse {
        self.server.post("/upload").multipart(file_form(name, content)).await
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_limit(10 * 1024 * 1024)
}

pub fn create_test_app_with_limit(max_upload_size: u64) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("uploads")).unwrap();
    let converter = Converter::new(temp_dir.path().join("conversions")).unwrap();
    let state = AppState::new(storage, converter).with_max_upload_size(max_upload_size);

    let server = TestServer::new(create_router(Arc::new(state))).unwrap();

    TestApp { server, temp_dir }
}

pub fn file_form(name: &str, content: &[u8]) -> MultipartForm {
    let part = Part::bytes(content.to_vec())
        .file_name(name.to_string())
        .mime_type("application/octet-stream");
    MultipartForm::new().add_part("file", part)
}

pub fn header<'a>(response: &'a TestResponse, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
