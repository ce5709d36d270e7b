#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;

use sjaplus_api::config::ServerConfig;
use sjaplus_api::router::build_app_router;
use sjaplus_api::state::AppState;
use sjaplus_core::upload::MAX_REQUEST_BYTES;

pub const TEST_ORIGIN: &str = "https://sjaplus.top";

const BOUNDARY: &str = "----sjaplus-test-boundary-7MA4YWxkTrZu0gW";

/// Temporary application and display roots, removed on drop.
pub struct TestDirs {
    pub apply: TempDir,
    pub display: TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        Self {
            apply: tempfile::tempdir().expect("create apply dir"),
            display: tempfile::tempdir().expect("create display dir"),
        }
    }

    /// Names of the application directories written so far.
    pub fn application_dirs(&self) -> Vec<String> {
        list_dir(self.apply.path())
    }
}

pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Build a test `ServerConfig` pointing at the given directories.
pub fn test_config(apply_dir: &Path, display_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.parse().unwrap()],
        request_timeout_secs: 30,
        apply_dir: apply_dir.to_path_buf(),
        display_dir: display_dir.to_path_buf(),
        max_upload_bytes: MAX_REQUEST_BYTES,
    }
}

/// Build the full application router, exactly as `main.rs` does.
pub async fn build_test_app(dirs: &TestDirs) -> Router {
    build_test_app_with(test_config(dirs.apply.path(), dirs.display.path())).await
}

pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::from_config(config);
    state.applications.init().await.expect("init storage");
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", MultipartForm::content_type())
        .body(Body::from(form.finish()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body is JSON")
}

// ---------------------------------------------------------------------------
// Multipart builder
// ---------------------------------------------------------------------------

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Metadata that passes every validation rule.
pub fn valid_meta() -> serde_json::Value {
    json!({
        "project_name": "Demo",
        "author_name": "A",
        "author_link": "https://x.com",
        "brief": "demo",
        "links": [
            { "platform": "web", "url": "https://x.com/demo", "is_default": true }
        ]
    })
}

/// Image payload of `len` bytes that never contains the boundary.
pub fn image_bytes(len: usize) -> Vec<u8> {
    vec![0xAB; len]
}

/// A complete, valid submission: 100 KB png cover and 50 KB jpg avatar.
pub fn valid_form(meta: &serde_json::Value) -> MultipartForm {
    MultipartForm::new()
        .text("meta", &meta.to_string())
        .file("cover", "cover.png", &image_bytes(100 * 1024))
        .file("avatar", "me.jpg", &image_bytes(50 * 1024))
}
