//! Output types returned by the OCR entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The result of one OCR run.
///
/// Both text views are always present: `rendered` with every resolvable
/// image reference inlined as base64, and `raw` exactly as the service
/// returned it. Persistence is recoverable-but-reported: if the markdown
/// write failed, `saved_to` is `None`, `save_error` describes why, and the
/// in-memory result is still fully usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Self-contained markdown: per-page text with images inlined, pages
    /// joined with one blank line.
    pub rendered: String,

    /// The untouched per-page markdown, concatenated the same way.
    pub raw: String,

    /// Per-page breakdown, in service order.
    pub pages: Vec<PageText>,

    /// Timing and size summary.
    pub stats: OcrStats,

    /// Where the rendered markdown was written, when persistence ran and
    /// succeeded.
    pub saved_to: Option<PathBuf>,

    /// Why persistence failed, when it did. The result above is unaffected.
    pub save_error: Option<String>,
}

/// One page of the response, as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// 0-based page index, as returned by the service.
    pub index: usize,
    /// The page's raw markdown.
    pub markdown: String,
    /// Number of images the service extracted from this page.
    pub image_count: usize,
}

/// Summary statistics for one OCR run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrStats {
    /// Pages in the response.
    pub page_count: usize,
    /// Image references substituted into the rendered output.
    pub images_inlined: usize,
    /// Wall-clock time of the remote OCR round trip (upload, signed URL,
    /// process, and delete for local PDFs).
    pub ocr_duration_ms: u64,
    /// Wall-clock time of the whole pipeline including persistence.
    pub total_duration_ms: u64,
}
