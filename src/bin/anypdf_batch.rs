//! Batch harness binary: translate one PDF into every language of a CSV.
//!
//! Maps CLI flags to `ClientConfig` + `BatchRun`, draws a progress bar with
//! one log line per language, and prints a summary. Per-language failures do
//! not change the exit status; configuration errors do.

use anyhow::{Context, Result};
use anypdf_client::{BatchProgressCallback, BatchRun, ClientConfig, ProgressCallback, Tier};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the whole batch, one line per
/// finished language.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading languages…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_languages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} languages  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_languages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Translating");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Starting batch of {total_languages} languages…"))
        ));
    }

    fn on_language_start(&self, _index: usize, _total: usize, code: &str) {
        self.bar.set_message(code.to_string());
    }

    fn on_language_complete(&self, index: usize, total: usize, code: &str, output: &Path) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<6}  {}",
            green("✓"),
            index,
            total,
            code,
            dim(&output.display().to_string()),
        ));
        self.bar.inc(1);
    }

    fn on_language_error(&self, index: usize, total: usize, code: &str, error: &str) {
        // Keep the line readable; the full error is in the log.
        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<6}  {}",
            red("✗"),
            index,
            total,
            code,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _total_languages: usize, _succeeded: usize) {
        self.bar.finish_and_clear();
    }
}

/// Batch translate a PDF into multiple languages using the TranslateAnyPDF API.
#[derive(Parser, Debug)]
#[command(
    name = "anypdf-batch",
    version,
    about = "Batch translate a PDF into every language listed in a CSV file",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Your RapidAPI key.
    #[arg(long = "api_key", env = "RAPIDAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Path to the PDF file to translate.
    #[arg(long = "input_pdf", default_value = "example.pdf")]
    input_pdf: PathBuf,

    /// Processing tier for the translation.
    #[arg(long, value_enum, default_value = "small")]
    tier: TierArg,

    /// Base directory to save translated PDFs. Default: ./language_test_outputs
    #[arg(long = "output_dir")]
    output_dir: Option<PathBuf>,

    /// CSV file with a `language_code` column. Default: languages.csv next to
    /// the executable.
    #[arg(long = "languages_csv")]
    languages_csv: Option<PathBuf>,

    /// API base URL.
    #[arg(
        long = "base_url",
        env = "ANYPDF_BASE_URL",
        default_value = anypdf_client::config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Disable progress bar.
    #[arg(long = "no_progress")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TierArg {
    Small,
    Medium,
    Large,
}

impl From<TierArg> for Tier {
    fn from(v: TierArg) -> Self {
        match v {
            TierArg::Small => Tier::Small,
            TierArg::Medium => Tier::Medium,
            TierArg::Large => Tier::Large,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library INFO logs interleave badly with the bar; keep them for -v.
    let show_progress = !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::builder()
        .api_key(cli.api_key.clone().unwrap_or_default())
        .base_url(cli.base_url.clone())
        .build()
        .context("Invalid configuration")?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| cwd.join("language_test_outputs"));

    let languages_csv = match cli.languages_csv.clone() {
        Some(p) => absolute(&cwd, &p),
        None => sibling_languages_csv()?,
    };

    let mut run = BatchRun::new(
        absolute(&cwd, &cli.input_pdf),
        cli.tier.into(),
        absolute(&cwd, &output_dir),
        languages_csv,
    );
    if show_progress {
        run = run.progress_callback(CliProgressCallback::new() as ProgressCallback);
    }

    let summary = run.run(&config).await.context("Batch aborted")?;

    let icon = if summary.failed() == 0 {
        green("✔")
    } else {
        cyan("⚠")
    };
    eprintln!(
        "{} {}/{} languages translated  ({} failed)",
        icon,
        bold(&summary.succeeded().to_string()),
        summary.total(),
        summary.failed(),
    );
    for outcome in summary.outcomes.iter().filter(|o| !o.is_success()) {
        eprintln!(
            "   {} {}: {}",
            red("✗"),
            outcome.language,
            outcome.error.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}

fn absolute(cwd: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        cwd.join(p)
    }
}

/// `languages.csv` in the directory holding the running executable.
fn sibling_languages_csv() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join("languages.csv"))
}
