//! Test utilities and common setup.
#![allow(dead_code)]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response},
};
use research_files::{AppState, Config, routes};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PDF_BYTES: &[u8] = b"%PDF-1.7 thesis";

/// Create a research root with a few documents:
///
/// ```text
/// papers/thesis.pdf
/// papers/Notes.TXT
/// figures/plot.png
/// figures/raw/           (nested directory)
/// data/metrics.csv
/// data/generate.py
/// index.txt              (top-level file)
/// ```
pub fn research_root() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    write(root, "papers/thesis.pdf", PDF_BYTES);
    write(root, "papers/Notes.TXT", b"notes");
    write(root, "figures/plot.png", b"\x89PNG");
    std::fs::create_dir_all(root.join("figures/raw")).expect("Failed to create dir");
    write(root, "data/metrics.csv", b"a,b\n1,2\n");
    write(root, "data/generate.py", b"print('hi')\n");
    write(root, "index.txt", b"index");

    temp_dir
}

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create dir");
    }
    std::fs::write(path, contents).expect("Failed to write file");
}

pub fn test_app(root: &Path) -> Router {
    routes::app(AppState::new(root.to_path_buf()))
}

pub fn test_app_with_config(root: &Path, config: Config) -> Router {
    routes::app(AppState::with_config(root.to_path_buf(), config))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|h| h.to_str().ok())
}
