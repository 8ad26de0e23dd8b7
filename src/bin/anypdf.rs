//! CLI binary for anypdf-client.
//!
//! A thin shim over the library crate: maps CLI flags to `ClientConfig`,
//! runs one `translate` or `analyze` operation, and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use anypdf_client::{
    analyze, languages, translate, ClientConfig, Tier, TranslationRequest,
};
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Translate a PDF to Spanish on the small tier
  anypdf translate report.pdf es small

  # Choose the output file
  anypdf translate report.pdf fr medium --output_file out/report.fr.pdf

  # Page and character counts, no job created
  anypdf analyze report.pdf

  # Same, as JSON
  anypdf analyze report.pdf --json

ENVIRONMENT VARIABLES:
  RAPIDAPI_KEY      RapidAPI key (same as --api_key)
  ANYPDF_BASE_URL   Override the API base URL
  RUST_LOG          Override the log filter (e.g. anypdf_client=debug)

DEFAULT OUTPUT:
  ./translated_pdfs/translated_<lang>_<inputname>
"#;

/// Translate or analyze PDF documents via the TranslateAnyPDF API.
#[derive(Parser, Debug)]
#[command(
    name = "anypdf",
    version,
    about = "Translate or analyze PDF documents via the TranslateAnyPDF API on RapidAPI",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Your RapidAPI key.
    #[arg(long = "api_key", env = "RAPIDAPI_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL.
    #[arg(
        long = "base_url",
        env = "ANYPDF_BASE_URL",
        global = true,
        default_value = anypdf_client::config::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Translate a PDF file.
    Translate {
        /// Path to the PDF file to translate.
        pdf_file: PathBuf,

        /// Target language code (e.g. es, fr, de, uk).
        target_lang: String,

        /// Processing tier for the translation.
        #[arg(value_enum)]
        tier: TierArg,

        /// Path to save the translated PDF.
        #[arg(long = "output_file")]
        output_file: Option<PathBuf>,
    },
    /// Analyze a PDF file to get page and character counts.
    Analyze {
        /// Path to the PDF file to analyze.
        pdf_file: PathBuf,

        /// Print the report as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
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
    init_logging(cli.verbose, cli.quiet);

    let config = ClientConfig::builder()
        .api_key(cli.api_key.clone().unwrap_or_default())
        .base_url(cli.base_url.clone())
        .build()
        .context("Invalid configuration")?;

    match cli.action {
        Action::Translate {
            pdf_file,
            target_lang,
            tier,
            output_file,
        } => {
            if !languages::is_supported(&target_lang) {
                warn!(
                    "Language code '{}' is not in the supported language list. Attempting anyway...",
                    target_lang
                );
            }
            let output_path = match output_file {
                Some(p) => p,
                None => default_output_path(&pdf_file, &target_lang)?,
            };
            let request = TranslationRequest::new(&pdf_file, target_lang, tier.into(), output_path);

            let output = translate(&config, &request)
                .await
                .context("Translation failed")?;

            if !cli.quiet {
                eprintln!(
                    "{}  job {}  {} bytes  {} polls  {}ms  →  {}",
                    green("✔"),
                    output.job_id,
                    output.bytes_written,
                    output.polls,
                    output.duration_ms,
                    bold(&output.output_path.display().to_string()),
                );
            }
        }
        Action::Analyze { pdf_file, json } => {
            let report = analyze(&config, &pdf_file)
                .await
                .context("Analysis failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report.fields)
                        .context("Failed to serialise report")?
                );
            } else {
                println!("File:  {}", pdf_file.display());
                for (label, value) in report.labelled() {
                    println!("{}  {}", dim(&format!("{label}:")), value);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
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
}

/// `./translated_pdfs/translated_<lang>_<inputname>` under the working directory.
fn default_output_path(pdf_file: &std::path::Path, target_lang: &str) -> Result<PathBuf> {
    let dir = std::env::current_dir()
        .context("Failed to read the current directory")?
        .join("translated_pdfs");
    Ok(TranslationRequest::default_output_path(
        &dir,
        pdf_file,
        target_lang,
    ))
}
