//! CLI binary for ocr2md.
//!
//! A thin shim over the library crate that maps CLI flags to `OcrConfig`,
//! runs the pipeline once, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ocr2md::{ocr_input, Credential, OcrConfig, DEFAULT_CONFIG_FILE};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # OCR a local PDF; rendered markdown goes to stdout and report.md
  ocr2md report.pdf

  # OCR a local image
  ocr2md receipt.png

  # OCR a document behind a URL (saved as output.md)
  ocr2md https://arxiv.org/pdf/2410.07073

  # Print the raw per-page markdown instead of the inlined rendering
  ocr2md --raw scan.jpeg

  # Structured JSON output (rendered + raw + per-page + stats)
  ocr2md --json report.pdf > report.json

  # Keep the result in memory only
  ocr2md --no-save report.pdf

  # Write the markdown file into a different directory
  ocr2md -o out/ report.pdf

SUPPORTED INPUTS:
  Local files    .pdf  .png  .jpg  .jpeg
  URLs           any HTTP(S) URL whose Content-Type header declares
                 application/pdf, image/png, image/jpeg, or image/jpg

CREDENTIAL:
  The Mistral API key is read from $MISTRAL_API_KEY, or from a JSON
  configuration file (default ./config.json):

    {"MISTRAL_API_KEY": "<your key>"}

ENVIRONMENT VARIABLES:
  MISTRAL_API_KEY      API key (overrides the configuration file)
  OCR2MD_CONFIG        Path to the JSON configuration file
  OCR2MD_MODEL         OCR model id (default: mistral-ocr-latest)
  OCR2MD_BASE_URL      OCR service base URL
  OCR2MD_OUTPUT_DIR    Directory for the markdown output file
"#;

/// OCR PDF files, images, and URLs to Markdown using the Mistral OCR API.
#[derive(Parser, Debug)]
#[command(
    name = "ocr2md",
    version,
    about = "OCR PDF files, images, and URLs to Markdown using the Mistral OCR API",
    long_about = "Extract text and images from PDF documents and images (local files or URLs) \
using the Mistral OCR service. Produces self-contained Markdown with every extracted image \
re-embedded as base64 data, and saves it next to the source's name.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local file path (.pdf, .png, .jpg, .jpeg) or HTTP/HTTPS URL.
    input: String,

    /// Path to the JSON configuration file holding the API key.
    #[arg(long, env = "OCR2MD_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory the markdown output file is written into.
    #[arg(short, long, env = "OCR2MD_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Do not write a markdown file; print only.
    #[arg(long)]
    no_save: bool,

    /// Print the raw per-page markdown instead of the inlined rendering.
    #[arg(long)]
    raw: bool,

    /// Output structured JSON (rendered, raw, pages, stats) instead of Markdown.
    #[arg(long)]
    json: bool,

    /// OCR model identifier.
    #[arg(long, env = "OCR2MD_MODEL", default_value = "mistral-ocr-latest")]
    model: String,

    /// OCR service base URL.
    #[arg(long, env = "OCR2MD_BASE_URL", default_value = "https://api.mistral.ai")]
    base_url: String,

    /// HTTP timeout per call, in seconds.
    #[arg(long, env = "OCR2MD_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Disable the progress spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the markdown itself.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Credential (fatal before anything else runs) ─────────────────────
    let credential = Credential::load(&cli.config)
        .context("Failed to load the OCR service credential")?;

    let config = OcrConfig::builder()
        .credential(credential)
        .model(cli.model.clone())
        .base_url(cli.base_url.clone())
        .timeout_secs(cli.timeout)
        .output_dir(&cli.output_dir)
        .save_output(!cli.no_save)
        .build()
        .context("Invalid configuration")?;

    // ── Run the pipeline, with a spinner while the service works ─────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Processing {}…", cli.input));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = ocr_input(&cli.input, &config).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let output = result.with_context(|| format!("OCR failed for '{}'", cli.input))?;

    // ── Print results ────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        let text = if cli.raw { &output.raw } else { &output.rendered };
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
        if !text.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    // ── Summary to stderr ────────────────────────────────────────────────
    if !cli.quiet {
        let mut summary = format!(
            "{} {} pages, {} images inlined, {}ms",
            green("✔"),
            bold(&output.stats.page_count.to_string()),
            output.stats.images_inlined,
            output.stats.total_duration_ms,
        );
        if let Some(ref path) = output.saved_to {
            summary.push_str(&format!("  →  {}", bold(&path.display().to_string())));
        }
        eprintln!("{summary}");

        if let Some(ref err) = output.save_error {
            eprintln!(
                "{} result not saved: {}",
                yellow("⚠"),
                dim(err)
            );
        }
    }

    Ok(())
}
