//! Result types returned by the public operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Outcome of a successful [`crate::translate`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationOutput {
    /// Job id assigned by the service.
    pub job_id: String,
    /// File the translated PDF was written to.
    pub output_path: PathBuf,
    /// Number of bytes written.
    pub bytes_written: u64,
    /// Status polls made before the job completed.
    pub polls: u32,
    /// Wall-clock time from submission to the file being written.
    pub duration_ms: u64,
}

/// Metadata returned by a successful `/analyze-pdf` call.
///
/// Holds every field of the response except `success`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub fields: Map<String, Value>,
}

impl AnalysisReport {
    /// Build a report from a response body, dropping the `success` flag.
    pub fn from_body(body: &Map<String, Value>) -> Self {
        let fields = body
            .iter()
            .filter(|(k, _)| k.as_str() != "success")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { fields }
    }

    pub fn page_count(&self) -> Option<u64> {
        self.fields.get("page_count").and_then(Value::as_u64)
    }

    pub fn character_count(&self) -> Option<u64> {
        self.fields.get("character_count").and_then(Value::as_u64)
    }

    /// Human-readable `(label, value)` pairs: `page_count` becomes `Page count`.
    pub fn labelled(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (humanise_key(k), value)
            })
            .collect()
    }
}

fn humanise_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Result of one language within a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOutcome {
    pub language: String,
    pub output_path: PathBuf,
    /// `None` on success, the error text otherwise.
    pub error: Option<String>,
}

impl LanguageOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-language record of a batch run, in CSV order.
///
/// Informational only: a batch that ran to the end is a completed batch no
/// matter how many languages failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub outcomes: Vec<LanguageOutcome>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_report_drops_success_flag() {
        let body = json!({"success": true, "page_count": 12, "character_count": 34567});
        let report = AnalysisReport::from_body(body.as_object().unwrap());
        assert!(!report.fields.contains_key("success"));
        assert_eq!(report.page_count(), Some(12));
        assert_eq!(report.character_count(), Some(34567));
    }

    #[test]
    fn labelled_fields_are_capitalised() {
        let body = json!({"page_count": 3, "estimated_tier": "small"});
        let report = AnalysisReport::from_body(body.as_object().unwrap());
        let labels = report.labelled();
        assert!(labels.contains(&("Page count".to_string(), "3".to_string())));
        assert!(labels.contains(&("Estimated tier".to_string(), "small".to_string())));
    }

    #[test]
    fn batch_summary_counts() {
        let summary = BatchSummary {
            outcomes: vec![
                LanguageOutcome {
                    language: "es".into(),
                    output_path: PathBuf::from("out/es.pdf"),
                    error: None,
                },
                LanguageOutcome {
                    language: "fr".into(),
                    output_path: PathBuf::from("out/fr.pdf"),
                    error: Some("Forbidden (403)".into()),
                },
            ],
        };
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
    }
}
