//! Job driver: submit → poll → download for one translation request.
//!
//! ```text
//! not_started ──▶ submitted ──▶ polling ──▶ completed
//!                     │            │
//!                     └────────────┴──────▶ failed
//! ```
//!
//! [`translate`] returns the typed error of whichever step failed.
//! [`translate_pdf`] is the log-and-report form used by the CLIs and the
//! batch harness: it never raises, it returns whether the file was written.

use crate::config::ClientConfig;
use crate::error::AnyPdfError;
use crate::job::TranslationRequest;
use crate::output::TranslationOutput;
use crate::pipeline::{download, input, poll, request::ApiClient, submit};
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Translate one PDF and write the result to `request.output_path`.
///
/// # Errors
/// - Configuration: input file missing or unreadable (no request is sent)
/// - Submission: 4xx classification, or a response without `job_id`/`status`
/// - Polling: no status response, terminal failure status, poll budget spent
/// - Download: transport error, non-2xx, or the file could not be written
pub async fn translate(
    config: &ClientConfig,
    request: &TranslationRequest,
) -> Result<TranslationOutput, AnyPdfError> {
    let span = info_span!(
        "job",
        lang = %request.target_lang,
        tier = %request.tier
    );
    run_job(config, request).instrument(span).await
}

async fn run_job(
    config: &ClientConfig,
    request: &TranslationRequest,
) -> Result<TranslationOutput, AnyPdfError> {
    let start = Instant::now();
    info!("--- Starting PDF Translation ---");

    // ── Step 0: Resolve input ────────────────────────────────────────────
    let resolved = input::resolve_input(&request.document)?;
    info!("Input: {}", resolved.path().display());
    info!(
        "PDF: {}, Target Language: {}, Tier: {}",
        resolved.file_name(),
        request.target_lang,
        request.tier
    );

    let client = ApiClient::new(config)?;

    // ── Step 1: Submit ───────────────────────────────────────────────────
    info!("Step 1: Initiating Translation Job...");
    let upload = resolved.load().await?;
    let job = submit::submit_job(&client, upload, &request.target_lang, request.tier).await?;

    // ── Step 2: Poll ─────────────────────────────────────────────────────
    info!("Step 2: Polling Job Status for {}...", job.job_id);
    let completed = poll::poll_job(&client, &job.job_id).await?;

    // ── Step 3: Download ─────────────────────────────────────────────────
    info!("Step 3: Downloading translated file...");
    let bytes_written =
        download::download_to_file(config, &completed.download_url, &request.output_path).await?;

    Ok(TranslationOutput {
        job_id: job.job_id,
        output_path: request.output_path.clone(),
        bytes_written,
        polls: completed.polls,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Translate one PDF, logging any failure. Returns `true` only if every step
/// succeeded and the output file was written.
pub async fn translate_pdf(config: &ClientConfig, request: &TranslationRequest) -> bool {
    match translate(config, request).await {
        Ok(output) => {
            info!(
                "Translation of '{}' to '{}' finished: {} bytes in {}ms",
                request.document.display(),
                request.target_lang,
                output.bytes_written,
                output.duration_ms
            );
            true
        }
        Err(e) => {
            error!(
                "Translation of '{}' to '{}' failed: {}",
                request.document.display(),
                request.target_lang,
                e
            );
            false
        }
    }
}

/// Synchronous wrapper around [`translate`].
///
/// Creates a temporary tokio runtime internally.
pub fn translate_sync(
    config: &ClientConfig,
    request: &TranslationRequest,
) -> Result<TranslationOutput, AnyPdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| AnyPdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(translate(config, request))
}
