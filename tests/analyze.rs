//! `/analyze-pdf` tests.

mod common;

use anypdf_client::{analyze, AnyPdfError};
use common::{config_for, sample_pdf, API_KEY};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn successful_analysis_returns_metadata() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());

    Mock::given(method("POST"))
        .and(path("/analyze-pdf"))
        .and(header("X-RapidAPI-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "page_count": 4,
            "character_count": 5120,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = analyze(&config_for(&server), &pdf).await.unwrap();
    assert_eq!(report.page_count(), Some(4));
    assert_eq!(report.character_count(), Some(5120));
    assert!(!report.fields.contains_key("success"));
}

#[tokio::test]
async fn explicit_failure_flag_surfaces_code_and_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());

    Mock::given(method("POST"))
        .and(path("/analyze-pdf"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error_code": "INVALID_PDF",
            "message": "File is not a valid PDF",
        })))
        .mount(&server)
        .await;

    let err = analyze(&config_for(&server), &pdf).await.unwrap_err();
    match err {
        AnyPdfError::AnalysisFailed {
            error_code,
            message,
        } => {
            assert_eq!(error_code, "INVALID_PDF");
            assert_eq!(message, "File is not a valid PDF");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn response_without_success_flag_is_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());

    Mock::given(method("POST"))
        .and(path("/analyze-pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page_count": 4})))
        .mount(&server)
        .await;

    let err = analyze(&config_for(&server), &pdf).await.unwrap_err();
    assert!(matches!(err, AnyPdfError::AnalysisRejected { status: 200, .. }));
}

#[tokio::test]
async fn server_error_propagates() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());

    Mock::given(method("POST"))
        .and(path("/analyze-pdf"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = analyze(&config_for(&server), &pdf).await.unwrap_err();
    assert!(matches!(err, AnyPdfError::ServerError { status: 500, .. }));
}
