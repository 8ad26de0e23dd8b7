//! Batch harness tests: CSV validation and per-language isolation.

mod common;

use anypdf_client::{AnyPdfError, BatchProgressCallback, BatchRun, ClientConfig, Tier};
use common::{config_for, sample_pdf};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let p = dir.join("languages.csv");
    std::fs::write(&p, contents).unwrap();
    p
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl BatchProgressCallback for Recorder {
    fn on_batch_start(&self, total_languages: usize) {
        self.events.lock().unwrap().push(format!("start:{total_languages}"));
    }

    fn on_language_complete(&self, _index: usize, _total: usize, code: &str, _output: &Path) {
        self.events.lock().unwrap().push(format!("ok:{code}"));
    }

    fn on_language_error(&self, _index: usize, _total: usize, code: &str, _error: &str) {
        self.events.lock().unwrap().push(format!("err:{code}"));
    }

    fn on_batch_complete(&self, _total_languages: usize, succeeded: usize) {
        self.events.lock().unwrap().push(format!("done:{succeeded}"));
    }
}

#[tokio::test]
async fn failing_language_does_not_stop_the_batch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());
    let csv = write_csv(dir.path(), "language_code\nes\nfr\n");
    let out_dir = dir.path().join("outputs");

    // Languages run in CSV order: the first submission is `es`, the second `fr`.
    Mock::given(method("POST"))
        .and(path("/translate/small"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"job_id": "job-es", "status": "queued"})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/translate/small"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "quota exceeded"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status/job-es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "download_url": format!("{}/cdn/es.pdf", server.uri()),
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/es.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"spanish".to_vec()))
        .mount(&server)
        .await;

    let recorder = Arc::new(Recorder::default());
    let run = BatchRun::new(&pdf, Tier::Small, &out_dir, &csv)
        .progress_callback(recorder.clone() as Arc<dyn BatchProgressCallback>);

    let summary = run.run(&config_for(&server)).await.expect("batch completes");

    assert_eq!(summary.total(), 2);
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);

    let es = &summary.outcomes[0];
    assert_eq!(es.language, "es");
    assert!(es.is_success());
    assert_eq!(es.output_path, out_dir.join("translated_example_es.pdf"));
    assert_eq!(std::fs::read(&es.output_path).unwrap(), b"spanish");

    let fr = &summary.outcomes[1];
    assert_eq!(fr.language, "fr");
    assert!(fr.error.as_deref().unwrap().contains("403"));
    assert!(!fr.output_path.exists());

    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec!["start:2", "ok:es", "err:fr", "done:1"]
    );
}

#[tokio::test]
async fn missing_language_column_aborts_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());
    let csv = write_csv(dir.path(), "code\nes\nfr\n");

    let err = BatchRun::new(&pdf, Tier::Small, dir.path().join("out"), &csv)
        .run(&config_for(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, AnyPdfError::MissingLanguageColumn { .. }));
}

#[tokio::test]
async fn missing_inputs_abort_the_batch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());
    let csv = write_csv(dir.path(), "language_code\nes\n");
    let out = dir.path().join("out");

    let err = BatchRun::new(dir.path().join("missing.pdf"), Tier::Small, &out, &csv)
        .run(&config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, AnyPdfError::FileNotFound { .. }));

    let err = BatchRun::new(&pdf, Tier::Small, &out, dir.path().join("missing.csv"))
        .run(&config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, AnyPdfError::LanguagesCsvNotFound { .. }));

    let mut keyless = config_for(&server);
    keyless.api_key = String::new();
    let err = BatchRun::new(&pdf, Tier::Small, &out, &csv)
        .run(&keyless)
        .await
        .unwrap_err();
    assert!(matches!(err, AnyPdfError::MissingApiKey));

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn empty_language_list_completes_with_empty_summary() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let pdf = sample_pdf(dir.path());
    let csv = write_csv(dir.path(), "language_code,name\n");

    let summary = BatchRun::new(&pdf, Tier::Small, dir.path().join("out"), &csv)
        .run(&config_for(&server))
        .await
        .unwrap();

    assert_eq!(summary.total(), 0);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[test]
fn config_builder_rejects_missing_key_before_batch() {
    let err = ClientConfig::builder().build().unwrap_err();
    assert!(matches!(err, AnyPdfError::MissingApiKey));
}
