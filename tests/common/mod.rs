//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use anypdf_client::{ClientConfig, Tier, TranslationRequest};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n% test document\n";

/// Route library logs through the test harness; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client config pointed at `server`, with every wait shrunk to zero.
pub fn config_for(server: &MockServer) -> ClientConfig {
    init_tracing();
    ClientConfig::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .retry_backoff(Duration::ZERO)
        .poll_interval(Duration::ZERO)
        .build()
        .expect("valid config")
}

/// Write a small PDF into `dir` and return its path.
pub fn sample_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("example.pdf");
    std::fs::write(&path, PDF_BYTES).expect("write sample pdf");
    path
}

pub fn request_for(dir: &Path, lang: &str) -> TranslationRequest {
    let document = sample_pdf(dir);
    let output = dir.join("out").join(format!("translated_{lang}_example.pdf"));
    TranslationRequest::new(document, lang, Tier::Small, output)
}

/// Requests the server received on `path`.
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == path)
        .collect()
}
