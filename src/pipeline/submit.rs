//! Job submission: upload the document to `/translate/{tier}`.

use crate::config::Tier;
use crate::error::AnyPdfError;
use crate::job::{Job, JobStatus};
use crate::pipeline::request::{ApiClient, Payload, UploadFile};
use reqwest::Method;
use tracing::{error, info};

/// Submit one translation job.
///
/// The submission is accepted only when the status is 200 or 202 *and* the
/// body carries both a `job_id` and a `status`. Anything else fails the run:
/// a classified 4xx surfaces as its typed error, every other outcome as
/// [`AnyPdfError::SubmissionRejected`].
pub async fn submit_job(
    client: &ApiClient,
    file: UploadFile,
    target_lang: &str,
    tier: Tier,
) -> Result<Job, AnyPdfError> {
    let payload = Payload::default()
        .with_file(file)
        .with_form_field("target_lang", target_lang);
    let endpoint = format!("/translate/{}", tier.as_str());

    let response = client.request(Method::POST, &endpoint, &payload).await?;

    let accepted = matches!(response.status, 200 | 202);
    if let (true, Some(job_id), Some(status)) = (
        accepted,
        response.str_field("job_id"),
        response.str_field("status"),
    ) {
        info!(
            "Job initiated successfully. Job ID: {}, Status: {}",
            job_id, status
        );
        return Ok(Job {
            job_id: job_id.to_string(),
            status: Some(JobStatus::from(status)),
            download_url: None,
            error_message: None,
        });
    }

    error!(
        "Failed to initiate job. Status: {}, Response: {}",
        response.status,
        response.detail()
    );
    Err(response
        .error()
        .unwrap_or_else(|| AnyPdfError::SubmissionRejected {
            status: Some(response.status),
            detail: response.detail(),
        }))
}
