//! # ocr2md
//!
//! OCR PDF and image documents to Markdown using the Mistral OCR API.
//!
//! ## Why this crate?
//!
//! Traditional PDF-to-text tools fail on scans, complex layouts, and
//! embedded figures. The Mistral OCR service reads a document as a human
//! would and returns structured markdown per page, with the extracted
//! images available as base64 payloads. This crate wraps that service in a
//! small pipeline that produces a self-contained markdown file: every image
//! reference in the returned text is re-inlined with its base64 data, so
//! the output renders anywhere with no sidecar files.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF / image (file or URL)
//!  │
//!  ├─ 1. Classify  filename suffix, or Content-Type header for URLs
//!  ├─ 2. Submit    upload + signed URL + OCR + delete (local PDFs),
//!  │               inline data: URI (local images), pass-through (URLs)
//!  ├─ 3. Assemble  substitute ![id](id) placeholders with base64 payloads
//!  └─ 4. Persist   write <base-name>.md (output.md for URL inputs)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ocr2md::{ocr_input, Credential, OcrConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential from $MISTRAL_API_KEY or a config.json file
//!     let config = OcrConfig::builder()
//!         .credential(Credential::load("config.json")?)
//!         .build()?;
//!     let output = ocr_input("document.pdf", &config).await?;
//!     println!("{}", output.rendered);
//!     eprintln!("{} pages, {} images inlined",
//!         output.stats.page_count,
//!         output.stats.images_inlined);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ocr2md` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! ocr2md = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod ocr;
pub mod output;
pub mod pipeline;
pub mod service;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Credential, OcrConfig, OcrConfigBuilder, CREDENTIAL_KEY, DEFAULT_CONFIG_FILE};
pub use error::OcrError;
pub use ocr::{ocr_file, ocr_input, ocr_input_sync, ocr_url};
pub use output::{OcrOutput, OcrStats, PageText};
pub use pipeline::classify::DocumentKind;
pub use service::{
    DocumentSource, MistralClient, OcrImage, OcrPage, OcrResponse, OcrService, UsageInfo,
};
