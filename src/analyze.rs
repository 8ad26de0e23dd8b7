//! The `/analyze-pdf` operation: page and character counts for a document,
//! without creating a translation job.

use crate::config::ClientConfig;
use crate::error::AnyPdfError;
use crate::output::AnalysisReport;
use crate::pipeline::input;
use crate::pipeline::request::{ApiClient, Payload};
use reqwest::Method;
use serde_json::Value;
use tracing::{error, info};

/// Upload `document` to `/analyze-pdf` and return the reported metadata.
///
/// # Errors
/// - [`AnyPdfError::AnalysisFailed`] when the service answers `success: false`
/// - [`AnyPdfError::AnalysisRejected`] for any other non-success response
/// - the request helper's transport errors, unchanged
pub async fn analyze(
    config: &ClientConfig,
    document: impl AsRef<std::path::Path>,
) -> Result<AnalysisReport, AnyPdfError> {
    let resolved = input::resolve_input(document)?;
    info!("--- Analyzing PDF: {} ---", resolved.file_name());

    let client = ApiClient::new(config)?;
    let payload = Payload::default().with_file(resolved.load().await?);
    let response = client
        .request(Method::POST, "/analyze-pdf", &payload)
        .await?;

    let object = response.body.as_ref().and_then(Value::as_object);
    let success = object.and_then(|o| o.get("success")).and_then(Value::as_bool);

    match (response.status, object, success) {
        (200, Some(body), Some(true)) => {
            let report = AnalysisReport::from_body(body);
            info!("PDF Analysis successful:");
            for (label, value) in report.labelled() {
                info!("  {}: {}", label, value);
            }
            Ok(report)
        }
        (_, Some(body), Some(false)) => {
            let field = |key: &str| match body.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "None".to_string(),
                Some(other) => other.to_string(),
            };
            let (error_code, message) = (field("error_code"), field("message"));
            error!(
                "PDF Analysis returned an API error: {} - {}",
                error_code, message
            );
            Err(AnyPdfError::AnalysisFailed {
                error_code,
                message,
            })
        }
        (status, _, _) => {
            error!(
                "PDF Analysis failed. Status: {}, Response: {}",
                status,
                response.detail()
            );
            Err(AnyPdfError::AnalysisRejected {
                status,
                detail: response.detail(),
            })
        }
    }
}
