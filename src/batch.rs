//! Batch driver: translate one document into every language listed in a CSV.
//!
//! The batch is a best-effort sweep. Configuration problems abort it before
//! any request is sent; once languages are running, a failure is logged,
//! recorded in the [`BatchSummary`], and the next language starts. Languages
//! run strictly one after another.
//!
//! ## CSV format
//!
//! A header row with a `language_code` column is required; other columns are
//! ignored. Blank codes are skipped.
//!
//! ```text
//! language_code,name
//! es,Spanish
//! fr,French
//! ```

use crate::config::{ClientConfig, Tier};
use crate::error::AnyPdfError;
use crate::job::TranslationRequest;
use crate::languages;
use crate::output::{BatchSummary, LanguageOutcome};
use crate::progress::{NoopProgressCallback, ProgressCallback};
use crate::translate::translate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Name of the required CSV column.
pub const LANGUAGE_COLUMN: &str = "language_code";

/// One batch: a document, a tier, where to put results, and the CSV of
/// target languages.
#[derive(Clone)]
pub struct BatchRun {
    pub input_pdf: PathBuf,
    pub tier: Tier,
    pub output_dir: PathBuf,
    pub languages_csv: PathBuf,
    progress: ProgressCallback,
}

impl std::fmt::Debug for BatchRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRun")
            .field("input_pdf", &self.input_pdf)
            .field("tier", &self.tier)
            .field("output_dir", &self.output_dir)
            .field("languages_csv", &self.languages_csv)
            .finish_non_exhaustive()
    }
}

impl BatchRun {
    pub fn new(
        input_pdf: impl Into<PathBuf>,
        tier: Tier,
        output_dir: impl Into<PathBuf>,
        languages_csv: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_pdf: input_pdf.into(),
            tier,
            output_dir: output_dir.into(),
            languages_csv: languages_csv.into(),
            progress: Arc::new(NoopProgressCallback),
        }
    }

    /// Receive per-language events while the batch runs.
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.progress = cb;
        self
    }

    /// Output file for one language:
    /// `<output_dir>/translated_<stem>_<lang><.ext>`.
    pub fn output_path_for(&self, lang: &str) -> PathBuf {
        let stem = self
            .input_pdf
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let suffix = self
            .input_pdf
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        self.output_dir
            .join(format!("translated_{stem}_{lang}{suffix}"))
    }

    /// Run the batch.
    ///
    /// # Errors
    /// Only configuration errors, all raised before the first request:
    /// missing API key, missing input PDF, missing CSV, CSV without a
    /// `language_code` column, unreadable CSV. Per-language failures are
    /// reported in the returned [`BatchSummary`], never as `Err`.
    pub async fn run(&self, config: &ClientConfig) -> Result<BatchSummary, AnyPdfError> {
        info!("--- Starting Batch Language Translation Test ---");
        info!("Input PDF: {}", self.input_pdf.display());
        info!("Tier: {}", self.tier);
        info!("Base Output Directory: {}", self.output_dir.display());
        info!("Languages CSV: {}", self.languages_csv.display());

        if config.api_key.trim().is_empty() {
            return Err(AnyPdfError::MissingApiKey);
        }
        if !self.input_pdf.is_file() {
            return Err(AnyPdfError::FileNotFound {
                path: self.input_pdf.clone(),
            });
        }
        if !self.languages_csv.is_file() {
            return Err(AnyPdfError::LanguagesCsvNotFound {
                path: self.languages_csv.clone(),
            });
        }

        let languages = read_languages(&self.languages_csv)?;
        info!(
            "Found {} languages to test: {:?}",
            languages.len(),
            languages
        );

        let mut summary = BatchSummary::default();
        if languages.is_empty() {
            info!("No languages found in CSV to test.");
            return Ok(summary);
        }

        let total = languages.len();
        self.progress.on_batch_start(total);

        for (i, code) in languages.iter().enumerate() {
            let index = i + 1;
            info!("--- Testing Language: {} ({}/{}) ---", code, index, total);

            if !languages::is_supported(code) {
                warn!(
                    "Language code '{}' from CSV is not in the supported language list. Attempting anyway...",
                    code
                );
            }

            self.progress.on_language_start(index, total, code);
            let output_path = self.output_path_for(code);
            let request =
                TranslationRequest::new(&self.input_pdf, code.as_str(), self.tier, &output_path);

            let error = match translate(config, &request).await {
                Ok(output) => {
                    info!(
                        "Successfully translated and saved for language '{}' to {}",
                        code,
                        output.output_path.display()
                    );
                    self.progress
                        .on_language_complete(index, total, code, &output.output_path);
                    None
                }
                Err(e) => {
                    error!("Translation failed for language '{}': {}", code, e);
                    let msg = e.to_string();
                    self.progress.on_language_error(index, total, code, &msg);
                    Some(msg)
                }
            };

            summary.outcomes.push(LanguageOutcome {
                language: code.clone(),
                output_path,
                error,
            });
            info!("--- Finished Testing Language: {} ---", code);
        }

        self.progress.on_batch_complete(total, summary.succeeded());
        info!(
            "--- Batch Language Translation Test Finished: {}/{} succeeded ---",
            summary.succeeded(),
            summary.total()
        );
        Ok(summary)
    }
}

/// Read the `language_code` column of a CSV file, in row order.
///
/// Codes are trimmed; blank cells are skipped. Rows may have fewer columns
/// than the header.
pub fn read_languages(path: &Path) -> Result<Vec<String>, AnyPdfError> {
    let csv_error = |e: csv::Error| AnyPdfError::CsvRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let column = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|h| h.trim() == LANGUAGE_COLUMN)
        .ok_or_else(|| AnyPdfError::MissingLanguageColumn {
            path: path.to_path_buf(),
        })?;

    let mut languages = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(code) = record.get(column).map(str::trim).filter(|c| !c.is_empty()) {
            languages.push(code.to_string());
        }
    }
    Ok(languages)
}
