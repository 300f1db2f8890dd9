//! Top-level OCR entry points.
//!
//! Two entry points mirror the two ways a document arrives — a local file
//! or a URL — plus a convenience dispatcher and a sync wrapper. Each runs
//! the full pipeline sequentially to completion: classify, submit, assemble,
//! persist. One invocation handles one document; nothing fans out.

use crate::config::OcrConfig;
use crate::error::OcrError;
use crate::output::{OcrOutput, OcrStats, PageText};
use crate::pipeline::{assemble, classify, persist, submit};
use crate::pipeline::classify::DocumentKind;
use crate::service::{MistralClient, OcrResponse, OcrService};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// OCR a document given as either a local file path or an HTTP(S) URL.
///
/// Dispatches to [`ocr_file`] or [`ocr_url`] on the input's shape.
pub async fn ocr_input(input: impl AsRef<str>, config: &OcrConfig) -> Result<OcrOutput, OcrError> {
    let input = input.as_ref();
    if classify::is_url(input) {
        ocr_url(input, config).await
    } else {
        ocr_file(Path::new(input), config).await
    }
}

/// OCR a local PDF or image file.
///
/// Classification happens first, from the filename suffix alone, so an
/// unsupported file is rejected before any network call. The rendered
/// markdown is persisted as `<base-name>.md` in the configured output
/// directory unless persistence is disabled.
pub async fn ocr_file(path: impl AsRef<Path>, config: &OcrConfig) -> Result<OcrOutput, OcrError> {
    let path = path.as_ref();
    let total_start = Instant::now();
    info!("Starting OCR: {}", path.display());

    let kind = classify::classify_path(path)?;
    let service = resolve_service(config)?;

    let ocr_start = Instant::now();
    let response = match kind {
        DocumentKind::Pdf => submit::pdf_file(service.as_ref(), path).await?,
        DocumentKind::Image => submit::image_file(service.as_ref(), path).await?,
    };
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    let source_name = path.file_name().and_then(|n| n.to_str());
    finish(response, source_name, config, ocr_duration_ms, total_start).await
}

/// OCR a document behind an HTTP(S) URL.
///
/// The URL is classified by its `Content-Type` header (headers only, no
/// body), then passed to the service unmodified — no local download. With
/// no local file name, output is persisted as `output.md`.
pub async fn ocr_url(url: impl AsRef<str>, config: &OcrConfig) -> Result<OcrOutput, OcrError> {
    let url = url.as_ref();
    let total_start = Instant::now();
    info!("Starting OCR: {}", url);

    let kind = classify::classify_url(url, config.timeout_secs).await?;
    let service = resolve_service(config)?;

    let ocr_start = Instant::now();
    let response = submit::by_url(service.as_ref(), url, kind).await?;
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    finish(response, None, config, ocr_duration_ms, total_start).await
}

/// Synchronous wrapper around [`ocr_input`].
///
/// Creates a temporary tokio runtime internally.
pub fn ocr_input_sync(input: impl AsRef<str>, config: &OcrConfig) -> Result<OcrOutput, OcrError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| OcrError::InvalidConfig(format!("failed to create tokio runtime: {e}")))?
        .block_on(ocr_input(input, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Resolve the OCR service: a pre-built override from the config, otherwise
/// a [`MistralClient`] built from the credential.
fn resolve_service(config: &OcrConfig) -> Result<Arc<dyn OcrService>, OcrError> {
    if let Some(ref service) = config.service {
        return Ok(Arc::clone(service));
    }
    Ok(Arc::new(MistralClient::new(config)?))
}

/// Assemble, persist, and package the response.
async fn finish(
    response: OcrResponse,
    source_name: Option<&str>,
    config: &OcrConfig,
    ocr_duration_ms: u64,
    total_start: Instant,
) -> Result<OcrOutput, OcrError> {
    let assembled = assemble::combine_pages(&response);

    let pages: Vec<PageText> = response
        .pages
        .iter()
        .map(|p| PageText {
            index: p.index,
            markdown: p.markdown.clone(),
            image_count: p.images.len(),
        })
        .collect();

    // A failed write is reported alongside the result, never instead of it:
    // the assembled markdown stays displayable even when the disk is not
    // cooperating.
    let (saved_to, save_error) = if config.save_output {
        match persist::save_markdown(&config.output_dir, source_name, &assembled.rendered).await {
            Ok(path) => (Some(path), None),
            Err(e) => {
                warn!("Could not persist rendered markdown: {e}");
                (None, Some(e.to_string()))
            }
        }
    } else {
        (None, None)
    };

    let stats = OcrStats {
        page_count: response.pages.len(),
        images_inlined: assembled.images_inlined,
        ocr_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "OCR complete: {} pages, {} images inlined, {}ms",
        stats.page_count, stats.images_inlined, stats.total_duration_ms
    );

    Ok(OcrOutput {
        rendered: assembled.rendered,
        raw: assembled.raw,
        pages,
        stats,
        saved_to,
        save_error,
    })
}
