//! Error types for the anypdf-client library.
//!
//! Every failure of an operation is reported through one fatal error type,
//! [`AnyPdfError`]. The variants group into four families:
//!
//! * **Configuration**: missing API key, missing input file, malformed
//!   languages CSV. Raised before any network call is made.
//! * **HTTP classification**: what the request helper decided about a
//!   response status (401, 403, 429, other 4xx, 5xx) or a transport failure.
//! * **Job lifecycle**: the remote job was rejected, failed, or never
//!   finished within the poll budget.
//! * **Output**: the translated file could not be downloaded or written.
//!
//! Only [`AnyPdfError::Timeout`] is ever retried, and only by the request
//! helper itself. Everything else is terminal for the call that produced it.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the anypdf-client library.
#[derive(Debug, Error)]
pub enum AnyPdfError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// No RapidAPI key was supplied.
    #[error("RapidAPI key is required.\nProvide it with --api_key or set the RAPIDAPI_KEY environment variable.")]
    MissingApiKey,

    /// Input file was not found at the given path.
    #[error("Input PDF file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The languages CSV does not exist.
    #[error("Languages CSV file not found: '{path}'")]
    LanguagesCsvNotFound { path: PathBuf },

    /// The languages CSV has no `language_code` column.
    #[error("CSV file '{path}' must contain a 'language_code' header")]
    MissingLanguageColumn { path: PathBuf },

    /// The languages CSV could not be read or parsed.
    #[error("Failed to read or parse languages CSV '{path}': {reason}")]
    CsvRead { path: PathBuf, reason: String },

    /// A tier string other than small / medium / large.
    #[error("Invalid tier '{0}': expected one of small, medium, large")]
    InvalidTier(String),

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── HTTP classification ───────────────────────────────────────────────
    /// 401: the API key is invalid or missing.
    #[error("Unauthorized (401): your RapidAPI key is invalid or missing")]
    Unauthorized,

    /// 403: no access to this tier/endpoint, or quota exceeded.
    #[error("Forbidden (403): no access to this tier/endpoint, or quota exceeded. Message: {message}")]
    Forbidden { message: String },

    /// 429: rate limit exceeded.
    #[error("Too Many Requests (429): rate limit exceeded. Message: {message}")]
    RateLimited { message: String },

    /// Any other 4xx response.
    #[error("Client error ({status}). Message: {message}")]
    ClientError { status: u16, message: String },

    /// 5xx response. The body is not guaranteed to be structured.
    #[error("HTTP server error ({status}) from '{url}'")]
    ServerError { url: String, status: u16 },

    /// Connect or read timeout, after all retry attempts were used.
    #[error("Request to '{url}' timed out after {attempts} attempt(s)")]
    Timeout { url: String, attempts: u32 },

    /// Connection refused, DNS failure, or any other transport error.
    #[error("Request to '{url}' failed: {reason}")]
    Transport { url: String, reason: String },

    // ── Job lifecycle ─────────────────────────────────────────────────────
    /// Submission response was not 200/202 with both `job_id` and `status`.
    #[error("Failed to initiate job. Status: {}, Response: {detail}", .status.map_or_else(|| "none".to_string(), |s| s.to_string()))]
    SubmissionRejected { status: Option<u16>, detail: String },

    /// The status endpoint returned no usable body.
    #[error("Polling failed for job {job_id}: could not get status response")]
    PollingFailed { job_id: String },

    /// The service reported a terminal failure status.
    #[error("Job {job_id} ended with status '{status}'. Error: {message}")]
    JobFailed {
        job_id: String,
        status: String,
        message: String,
    },

    /// The job completed but the response carried no download URL.
    #[error("Job {job_id} completed but no download URL was provided by the API")]
    MissingDownloadUrl { job_id: String },

    /// Poll budget exhausted before a terminal status was observed.
    #[error("Job {job_id} did not complete after {polls} polls. Last known status: {last_status}")]
    JobTimedOut {
        job_id: String,
        polls: u32,
        last_status: String,
    },

    // ── Analysis ──────────────────────────────────────────────────────────
    /// `/analyze-pdf` answered with `success: false`.
    #[error("PDF analysis returned an API error: {error_code} - {message}")]
    AnalysisFailed { error_code: String, message: String },

    /// `/analyze-pdf` answered without a recognisable success structure.
    #[error("PDF analysis failed. Status: {status}, Response: {detail}")]
    AnalysisRejected { status: u16, detail: String },

    // ── Output ────────────────────────────────────────────────────────────
    /// CDN download failed (transport error or non-2xx).
    #[error("Failed to download translated PDF from '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// CDN download exceeded the read timeout.
    #[error("Download timed out after {secs}s from '{url}'")]
    DownloadTimeout { url: String, secs: u64 },

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_rejected_display_without_status() {
        let e = AnyPdfError::SubmissionRejected {
            status: None,
            detail: "No response data".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Status: none"), "got: {msg}");
    }

    #[test]
    fn submission_rejected_display_with_status() {
        let e = AnyPdfError::SubmissionRejected {
            status: Some(200),
            detail: "{}".into(),
        };
        assert!(e.to_string().contains("Status: 200"));
    }

    #[test]
    fn job_timed_out_display() {
        let e = AnyPdfError::JobTimedOut {
            job_id: "abc".into(),
            polls: 60,
            last_status: "processing".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("60 polls"));
        assert!(msg.contains("processing"));
    }
}
