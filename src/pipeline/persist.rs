//! Persistence: write the rendered markdown next to the source's name.
//!
//! The output name is the source document's base name with its extension
//! stripped and `.md` appended; URL submissions with no local name fall back
//! to `output.md`. The file is overwritten on every run with the same source
//! name — no versioning, no backup, no locking.

use crate::error::OcrError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name used when the submission has no local file name (URL input).
pub const FALLBACK_OUTPUT_STEM: &str = "output";

/// Derive the output file name from the source document's name.
///
/// `report.pdf` → `report.md`; `None` → `output.md`.
pub fn output_file_name(source_name: Option<&str>) -> String {
    let stem = source_name
        .filter(|n| !n.is_empty())
        .and_then(|n| Path::new(n).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or(FALLBACK_OUTPUT_STEM);
    format!("{stem}.md")
}

/// Write the rendered markdown into `dir`, overwriting any previous run.
pub async fn save_markdown(
    dir: &Path,
    source_name: Option<&str>,
    rendered: &str,
) -> Result<PathBuf, OcrError> {
    let path = dir.join(output_file_name(source_name));

    tokio::fs::write(&path, rendered)
        .await
        .map_err(|e| OcrError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    debug!("Saved rendered markdown to {}", path.display());
    Ok(path)
}
