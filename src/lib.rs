//! # anypdf-client
//!
//! Client and batch harness for the TranslateAnyPDF API on RapidAPI.
//!
//! The service translates PDF documents asynchronously: a document is uploaded
//! to create a job, the job is polled until it reaches a terminal status, and
//! the translated PDF is fetched from a short-lived CDN link. This crate wraps
//! that lifecycle in one call per document and adds a harness that sweeps a
//! document across every language in a CSV file.
//!
//! ## Job Lifecycle
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate the local file, load it for upload
//!  ├─ 2. Submit    POST /translate/{tier}      → job_id
//!  ├─ 3. Poll      GET  /status/{job_id}       ×60, 5 s apart
//!  └─ 4. Download  GET  <download_url>         → output file
//! ```
//!
//! Every API call goes through one request helper that attaches the RapidAPI
//! headers, classifies the response status, and retries timeouts up to three
//! times with a linear 5 s backoff.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anypdf_client::{translate, ClientConfig, Tier, TranslationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .api_key(std::env::var("RAPIDAPI_KEY")?)
//!         .build()?;
//!     let request = TranslationRequest::new("report.pdf", "es", Tier::Small, "report.es.pdf");
//!     let output = translate(&config, &request).await?;
//!     eprintln!("job {} → {} bytes", output.job_id, output.bytes_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `anypdf` and `anypdf-batch` binaries (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## Logging
//!
//! The library logs through `tracing` and never installs a subscriber. Each
//! job runs inside a `job{lang, tier}` span.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod batch;
pub mod config;
pub mod error;
pub mod job;
pub mod languages;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod translate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::analyze;
pub use batch::{read_languages, BatchRun};
pub use config::{ClientConfig, ClientConfigBuilder, Tier};
pub use error::AnyPdfError;
pub use job::{Job, JobStatus, TranslationRequest};
pub use output::{AnalysisReport, BatchSummary, LanguageOutcome, TranslationOutput};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use translate::{translate, translate_pdf, translate_sync};
