//! Remote job model: the request that creates a job, and the job state the
//! status endpoint reports back.
//!
//! The service describes job state with an open set of strings. [`JobStatus`]
//! closes that set over the values the client acts on and keeps everything
//! else in [`JobStatus::Unknown`], so a status introduced by the service later
//! is still carried (and treated as "in progress") instead of failing to
//! deserialise.

use crate::config::Tier;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// One document/language/tier translation, immutable for the life of its job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Local PDF to upload.
    pub document: PathBuf,
    /// Target language code, e.g. `es`, `fr`, `uk`.
    pub target_lang: String,
    /// Processing tier.
    pub tier: Tier,
    /// Where the translated PDF is written.
    pub output_path: PathBuf,
}

impl TranslationRequest {
    pub fn new(
        document: impl Into<PathBuf>,
        target_lang: impl Into<String>,
        tier: Tier,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            document: document.into(),
            target_lang: target_lang.into(),
            tier,
            output_path: output_path.into(),
        }
    }

    /// Default output location for a single translation:
    /// `<dir>/translated_<lang>_<inputname>`.
    pub fn default_output_path(dir: &Path, document: &Path, target_lang: &str) -> PathBuf {
        let name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        dir.join(format!("translated_{target_lang}_{name}"))
    }
}

/// Job state as reported by `GET /status/{job_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    ErrorTierLimitExceeded,
    ErrorJobNotFound,
    ErrorMissingEstimationData,
    Failed,
    EnqueueFailed,
    /// Any status string the client does not know.
    Unknown(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::ErrorTierLimitExceeded => "error_tier_limit_exceeded",
            JobStatus::ErrorJobNotFound => "error_job_not_found",
            JobStatus::ErrorMissingEstimationData => "error_missing_estimation_data",
            JobStatus::Failed => "failed",
            JobStatus::EnqueueFailed => "enqueue_failed",
            JobStatus::Unknown(s) => s,
        }
    }

    /// One of the service's terminal failure statuses.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            JobStatus::ErrorTierLimitExceeded
                | JobStatus::ErrorJobNotFound
                | JobStatus::ErrorMissingEstimationData
                | JobStatus::Failed
                | JobStatus::EnqueueFailed
        )
    }

    /// `completed` or a terminal failure: the job must not be polled again.
    pub fn is_terminal(&self) -> bool {
        *self == JobStatus::Completed || self.is_terminal_failure()
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "error_tier_limit_exceeded" => JobStatus::ErrorTierLimitExceeded,
            "error_job_not_found" => JobStatus::ErrorJobNotFound,
            "error_missing_estimation_data" => JobStatus::ErrorMissingEstimationData,
            "failed" => JobStatus::Failed,
            "enqueue_failed" => JobStatus::EnqueueFailed,
            other => JobStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        JobStatus::from(s.as_str())
    }
}

impl From<JobStatus> for String {
    fn from(s: JobStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote job, replaced wholesale by every status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    /// `None` when the response carried no `status` field.
    pub status: Option<JobStatus>,
    pub download_url: Option<String>,
    pub error_message: Option<String>,
}

impl Job {
    /// Build the job state from a status response body.
    ///
    /// Fields of the wrong JSON type are treated as absent. Empty strings are
    /// kept for `status` but dropped for `download_url`.
    pub fn from_status_body(job_id: &str, body: &Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            job_id: job_id.to_string(),
            status: text("status").map(JobStatus::from),
            download_url: text("download_url").filter(|u| !u.is_empty()),
            error_message: text("error_message"),
        }
    }

    /// Status for log lines and error messages.
    pub fn status_label(&self) -> String {
        self.status
            .as_ref()
            .map_or_else(|| "None".to_string(), |s| s.to_string())
    }
}
