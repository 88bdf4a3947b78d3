use super::mocks::{MockCaptioner, MockClassifier};
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use captiond::config::{Config, LogsConfig, ModelsConfig, ServerConfig};
use captiond::pipeline::Pipeline;
use captiond::server::{AppState, ModelStatus};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Multipart boundary shared by the hand-built request bodies.
pub const BOUNDARY: &str = "test-boundary";

/// Create a test configuration with sensible defaults
pub fn create_test_config(upload_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            upload_dir: upload_dir.to_string_lossy().to_string(),
            max_upload_bytes: 1024 * 1024,
        },
        models: ModelsConfig::default(),
    }
}

/// App state with mock collaborators wired into a ready pipeline
pub fn ready_state(
    classifier: MockClassifier,
    captioner: MockCaptioner,
    upload_dir: &Path,
    max_upload_bytes: usize,
) -> AppState {
    AppState {
        pipeline: Some(Arc::new(Pipeline::new(
            Arc::new(classifier),
            Arc::new(captioner),
        ))),
        status: ModelStatus {
            classifier: true,
            captioner: true,
            enhancer: true,
        },
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes,
    }
}

/// App state for a service whose models failed to load
pub fn degraded_state(upload_dir: &Path) -> AppState {
    AppState {
        pipeline: None,
        status: ModelStatus {
            classifier: false,
            captioner: false,
            enhancer: true,
        },
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build a multipart body carrying an `image` file part and an optional
/// `length` text part
pub fn multipart_body(filename: &str, bytes: &[u8], length: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");

    if let Some(length) = length {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"length\"\r\n\r\n{length}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST request with a multipart body
pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Collect a response body as JSON
pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
