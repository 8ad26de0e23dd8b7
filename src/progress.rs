//! Progress-callback trait for per-language batch events.
//!
//! Pass an [`Arc<dyn BatchProgressCallback>`] to
//! [`crate::batch::BatchRun::progress_callback`] to receive events as the
//! batch driver works through the languages CSV. The `anypdf-batch` binary
//! uses it to drive a terminal progress bar; a test can count events; a host
//! application can forward them anywhere.
//!
//! # Example
//!
//! ```rust
//! use anypdf_client::BatchProgressCallback;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct FailureCounter {
//!     failed: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for FailureCounter {
//!     fn on_language_error(&self, _index: usize, _total: usize, code: &str, error: &str) {
//!         self.failed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{code}: {error}");
//!     }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the batch driver as it processes each language.
///
/// Languages are processed one at a time, in CSV order, so events never
/// overlap. All methods default to no-ops.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once, after the CSV was read and before the first language.
    fn on_batch_start(&self, total_languages: usize) {
        let _ = total_languages;
    }

    /// Called before the job for a language is submitted.
    ///
    /// # Arguments
    /// * `index`: 1-indexed position in the CSV
    /// * `total`: number of languages in the batch
    /// * `code`: language code from the CSV
    fn on_language_start(&self, index: usize, total: usize, code: &str) {
        let _ = (index, total, code);
    }

    /// Called when the translated file for a language was written.
    fn on_language_complete(&self, index: usize, total: usize, code: &str, output: &Path) {
        let _ = (index, total, code, output);
    }

    /// Called when a language failed at any step.
    fn on_language_error(&self, index: usize, total: usize, code: &str, error: &str) {
        let _ = (index, total, code, error);
    }

    /// Called once after every language was attempted.
    fn on_batch_complete(&self, total_languages: usize, succeeded: usize) {
        let _ = (total_languages, succeeded);
    }
}

/// A no-op implementation, used when no callback is configured.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias for the type stored in [`crate::batch::BatchRun`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
