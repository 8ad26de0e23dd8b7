//! Status polling: drive a submitted job to a terminal status.
//!
//! The loop makes at most `max_polls` calls to `GET /status/{job_id}`,
//! `poll_interval` apart. It stops on the first of:
//!
//! * no usable response (error, non-JSON, `null` or `{}`) →
//!   [`AnyPdfError::PollingFailed`]
//! * `completed` → success, provided a download URL came with it
//! * a terminal failure status → [`AnyPdfError::JobFailed`]
//! * the budget running out → [`AnyPdfError::JobTimedOut`]
//!
//! Every other status, including ones the client does not recognise and a
//! body without a `status` field, counts as still in progress.

use crate::error::AnyPdfError;
use crate::job::{Job, JobStatus};
use crate::pipeline::request::{ApiClient, Payload};
use reqwest::Method;
use tokio::time::sleep;
use tracing::{error, info, warn};

const DEFAULT_ERROR_MESSAGE: &str = "No specific error message provided by API.";

/// A job that reached `completed`, with the URL of its artifact.
#[derive(Debug, Clone)]
pub struct CompletedJob {
    pub job: Job,
    pub download_url: String,
    /// Status calls made, the completing one included.
    pub polls: u32,
}

/// Poll `job_id` until it completes, fails, or the poll budget runs out.
pub async fn poll_job(client: &ApiClient, job_id: &str) -> Result<CompletedJob, AnyPdfError> {
    let max_polls = client.config().max_polls;
    let interval = client.config().poll_interval;
    let endpoint = format!("/status/{job_id}");
    let payload = Payload::default();
    let mut last_status = "None".to_string();

    for poll in 1..=max_polls {
        info!("Polling attempt {}/{}...", poll, max_polls);

        let body = match client.request(Method::GET, &endpoint, &payload).await {
            Ok(response) => response.body,
            Err(e) => {
                error!("Polling failed: {}", e);
                None
            }
        };
        // `null`, `{}` and non-object bodies carry no status to act on.
        let Some(body) = body.filter(|b| b.as_object().is_some_and(|o| !o.is_empty())) else {
            error!("Polling failed: Could not get status response.");
            return Err(AnyPdfError::PollingFailed {
                job_id: job_id.to_string(),
            });
        };

        let job = Job::from_status_body(job_id, &body);
        last_status = job.status_label();
        info!("Job {} current status: {}", job_id, last_status);

        if let Some(status) = job.status.clone().filter(JobStatus::is_terminal) {
            return finish(job_id, job, status, poll);
        }

        if poll < max_polls {
            info!("Waiting {}s before next poll...", interval.as_secs_f64());
            sleep(interval).await;
        }
    }

    warn!(
        "Polling finished after {} attempts. Job did not complete. Last known status: {}",
        max_polls, last_status
    );
    Err(AnyPdfError::JobTimedOut {
        job_id: job_id.to_string(),
        polls: max_polls,
        last_status,
    })
}

/// Resolve a job whose status is terminal: success for `completed`, an error
/// for everything else.
fn finish(
    job_id: &str,
    job: Job,
    status: JobStatus,
    polls: u32,
) -> Result<CompletedJob, AnyPdfError> {
    if status != JobStatus::Completed {
        let message = job
            .error_message
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        error!(
            "Job {} ended with status '{}'. Error: {}",
            job_id, status, message
        );
        return Err(AnyPdfError::JobFailed {
            job_id: job_id.to_string(),
            status: status.to_string(),
            message,
        });
    }

    let Some(download_url) = job.download_url.clone() else {
        error!("Job completed but no download URL provided by API!");
        return Err(AnyPdfError::MissingDownloadUrl {
            job_id: job_id.to_string(),
        });
    };
    info!("Job {} COMPLETED. Download URL: {}", job_id, download_url);
    Ok(CompletedJob {
        job,
        download_url,
        polls,
    })
}
