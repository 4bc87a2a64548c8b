//! HTTP tests for the upload and scan endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use auditor_core::ExtractionConfig;
use auditor_core::WalkConfig;
use auditor_core::test_utils::ZipTestBuilder;
use auditor_core::test_utils::create_test_zip;
use auditor_server::AppState;
use auditor_server::ServerConfig;
use auditor_server::router;
use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::MultipartForm;
use axum_test::multipart::Part;
use bytes::Bytes;
use serde_json::Value;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn test_server(root: &Path) -> TestServer {
    server_with_config(&ServerConfig::default().with_extract_dir(root))
}

fn server_with_config(config: &ServerConfig) -> TestServer {
    let state = AppState::new(config);
    TestServer::new(router(Arc::new(state))).expect("failed to create test server")
}

fn zip_form(file_name: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "repo",
        Part::bytes(Bytes::from(data))
            .file_name(file_name)
            .mime_type("application/zip"),
    )
}

fn sample_zip() -> Vec<u8> {
    create_test_zip(&[("a.txt", "a"), ("dir/b.txt", "b"), ("dir/c.txt", "c")])
}

#[tokio::test]
async fn test_banner() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("running"));
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let server = test_server(&root);

    let response = server
        .post("/api/repo/upload")
        .multipart(MultipartForm::new().add_text("comment", "no archive here"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No file uploaded");
    assert!(!root.exists());
}

#[tokio::test]
async fn test_upload_without_multipart_body_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let server = test_server(&root);

    let response = server.post("/api/repo/upload").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No file uploaded");
    assert!(!root.exists());
}

#[tokio::test]
async fn test_upload_with_json_body_is_rejected() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let response = server
        .post("/api/repo/upload")
        .json(&json!({ "repo": "sample.zip" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_field_sent_twice_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let server = test_server(&root);

    let form = zip_form("one.zip", sample_zip()).add_part(
        "repo",
        Part::bytes(Bytes::from(sample_zip())).file_name("two.zip"),
    );
    let response = server.post("/api/repo/upload").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(!root.exists());
}

#[tokio::test]
async fn test_upload_then_scan_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let server = test_server(&root);

    let response = server
        .post("/api/repo/upload")
        .multipart(zip_form("sample.zip", sample_zip()))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["repository"], "sample");
    assert_eq!(body["filesExtracted"], 3);
    assert!(body["message"].as_str().unwrap().contains("extracted"));
    assert!(root.join("sample/dir/c.txt").is_file());

    let response = server.post("/api/scan/start").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Scan complete");
    assert_eq!(body["staticAnalysis"]["filesScanned"], 3);
    let issues = body["staticAnalysis"]["issuesDetected"].as_u64().unwrap();
    assert!(issues < 50);
    assert_eq!(body["aiSuggestions"]["provider"], "placeholder");
}

#[tokio::test]
async fn test_scan_selected_repository() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    server
        .post("/api/repo/upload")
        .multipart(zip_form("sample.zip", sample_zip()))
        .await
        .assert_status_ok();
    let other = ZipTestBuilder::new()
        .add_directory("src/")
        .add_file("src/lib.rs", b"")
        .build();
    server
        .post("/api/repo/upload")
        .multipart(zip_form("other.zip", other))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/scan/start")
        .json(&json!({ "repository": "other" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["staticAnalysis"]["filesScanned"], 1);

    let body: Value = server.post("/api/scan/start").await.json();
    assert_eq!(body["staticAnalysis"]["filesScanned"], 4);
}

#[tokio::test]
async fn test_scan_unknown_repository_is_not_found() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let response = server
        .post("/api/scan/start")
        .json(&json!({ "repository": "ghost" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_scan_invalid_repository_name() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let response = server
        .post("/api/scan/start")
        .json(&json!({ "repository": "../etc" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_malformed_body() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let response = server
        .post("/api/scan/start")
        .bytes(Bytes::from_static(b"{not json"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_before_any_upload_is_empty() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let response = server.post("/api/scan/start").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["staticAnalysis"]["filesScanned"], 0);
}

#[tokio::test]
async fn test_corrupt_upload_is_generic_server_error() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let server = test_server(&root);

    let response = server
        .post("/api/repo/upload")
        .multipart(zip_form("broken.zip", b"this is not a zip archive".to_vec()))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text();
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["message"], "Upload failed");
    assert!(!text.contains(temp.path().to_str().unwrap()));
}

#[tokio::test]
async fn test_traversal_upload_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let server = test_server(&root);

    let response = server
        .post("/api/repo/upload")
        .multipart(zip_form("evil.zip", create_test_zip(&[("../../pwned.txt", "x")])))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!temp.path().join("pwned.txt").exists());
}

#[tokio::test]
async fn test_upload_without_file_name_gets_generated_name() {
    let temp = TempDir::new().unwrap();
    let server = test_server(&temp.path().join("extracted"));

    let form = MultipartForm::new().add_part("repo", Part::bytes(Bytes::from(sample_zip())));
    let response = server.post("/api/repo/upload").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["repository"].as_str().unwrap().starts_with("upload-"));
}

#[tokio::test]
async fn test_lowered_file_quota_rejects_upload() {
    let temp = TempDir::new().unwrap();
    let config = ServerConfig::default()
        .with_extract_dir(temp.path().join("extracted"))
        .with_extraction(ExtractionConfig::default().with_max_file_count(2));
    let server = server_with_config(&config);

    let response = server
        .post("/api/repo/upload")
        .multipart(zip_form("sample.zip", sample_zip()))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Upload failed");
}

#[tokio::test]
async fn test_raised_file_quota_accepts_large_repository() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("extracted");
    let count = ExtractionConfig::default().max_file_count + 1;
    let archive = (0..count)
        .fold(ZipTestBuilder::new(), |builder, i| {
            builder.add_file(&format!("node_modules/f{i}.js"), b"")
        })
        .build();

    let response = test_server(&root)
        .post("/api/repo/upload")
        .multipart(zip_form("big.zip", archive.clone()))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let config = ServerConfig::default()
        .with_extract_dir(&root)
        .with_extraction(ExtractionConfig::default().with_max_file_count(count));
    let server = server_with_config(&config);

    let response = server
        .post("/api/repo/upload")
        .multipart(zip_form("big.zip", archive))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["filesExtracted"], count);

    let body: Value = server
        .post("/api/scan/start")
        .json(&json!({ "repository": "big" }))
        .await
        .json();
    assert_eq!(body["staticAnalysis"]["filesScanned"], count);
}

#[tokio::test]
async fn test_walk_budget_follows_server_config() {
    let temp = TempDir::new().unwrap();
    let config = ServerConfig::default()
        .with_extract_dir(temp.path().join("extracted"))
        .with_walk(WalkConfig::default().with_max_depth(2));
    let server = server_with_config(&config);

    server
        .post("/api/repo/upload")
        .multipart(zip_form("sample.zip", sample_zip()))
        .await
        .assert_status_ok();

    let response = server.post("/api/scan/start").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Scan failed");
}
