//! Content classification: decide whether a source is a PDF or an image.
//!
//! Two variants, selected by the document's origin. Local files are
//! classified purely by filename suffix — cheap and done before any network
//! call, so an unsupported file is rejected without touching the service.
//! URLs are classified by a header-only request: only the `Content-Type`
//! response header is read, never the body, so classification costs one
//! round-trip regardless of document size.

use crate::error::OcrError;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// The two document kinds the OCR service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Classify a local file by its suffix.
///
/// `.pdf` → PDF; `.png`, `.jpg`, `.jpeg` → image (case-insensitive). Any
/// other suffix is unsupported and the submission is rejected here, before
/// any network call.
pub fn classify_path(path: &Path) -> Result<DocumentKind, OcrError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => Ok(DocumentKind::Pdf),
        Some("png") | Some("jpg") | Some("jpeg") => Ok(DocumentKind::Image),
        _ => Err(OcrError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Classify a URL by its declared `Content-Type`.
///
/// Issues a HEAD request (headers only, no body download). A failed fetch
/// becomes a descriptive [`OcrError::HeaderFetch`] rather than a panic —
/// the caller is an interactive surface, not a program that halts on
/// failure.
pub async fn classify_url(url: &str, timeout_secs: u64) -> Result<DocumentKind, OcrError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| OcrError::HeaderFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client
        .head(url)
        .send()
        .await
        .map_err(|e| OcrError::HeaderFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    debug!("Content type of {}: '{}'", url, content_type);
    classify_content_type(url, &content_type)
}

/// Classify a declared content type by substring match.
///
/// Substring rather than exact match: real servers send parameterised values
/// like `application/pdf; qs=0.001` or `image/png; charset=binary`.
pub fn classify_content_type(url: &str, content_type: &str) -> Result<DocumentKind, OcrError> {
    if content_type.contains("application/pdf") {
        return Ok(DocumentKind::Pdf);
    }
    if ["image/png", "image/jpeg", "image/jpg"]
        .iter()
        .any(|t| content_type.contains(t))
    {
        return Ok(DocumentKind::Image);
    }
    Err(OcrError::UnsupportedContentType {
        url: url.to_string(),
        content_type: content_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com/doc.pdf"));
        assert!(!is_url("/tmp/doc.pdf"));
        assert!(!is_url("doc.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn classify_path_supported_suffixes() {
        assert_eq!(
            classify_path(Path::new("report.pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            classify_path(Path::new("scan.png")).unwrap(),
            DocumentKind::Image
        );
        assert_eq!(
            classify_path(Path::new("photo.jpg")).unwrap(),
            DocumentKind::Image
        );
        assert_eq!(
            classify_path(Path::new("photo.jpeg")).unwrap(),
            DocumentKind::Image
        );
    }

    #[test]
    fn classify_path_is_case_insensitive() {
        assert_eq!(
            classify_path(Path::new("REPORT.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            classify_path(Path::new("Scan.JPeG")).unwrap(),
            DocumentKind::Image
        );
    }

    #[test]
    fn classify_path_rejects_unsupported() {
        for name in ["notes.txt", "archive.zip", "noextension", "sheet.xlsx"] {
            let err = classify_path(Path::new(name)).unwrap_err();
            match err {
                OcrError::UnsupportedExtension { path } => {
                    assert_eq!(path, PathBuf::from(name));
                }
                other => panic!("expected UnsupportedExtension, got {other}"),
            }
        }
    }

    #[test]
    fn classify_content_type_pdf() {
        assert_eq!(
            classify_content_type("u", "application/pdf").unwrap(),
            DocumentKind::Pdf
        );
        // Parameterised value still matches by substring.
        assert_eq!(
            classify_content_type("u", "application/pdf; qs=0.001").unwrap(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn classify_content_type_images() {
        for ct in ["image/png", "image/jpeg", "image/jpg", "image/png; charset=binary"] {
            assert_eq!(
                classify_content_type("u", ct).unwrap(),
                DocumentKind::Image,
                "content type {ct}"
            );
        }
    }

    #[test]
    fn classify_content_type_rejects_others() {
        for ct in ["text/html", "image/webp", "application/json", ""] {
            let err = classify_content_type("https://x.test/a", ct).unwrap_err();
            match err {
                OcrError::UnsupportedContentType { content_type, .. } => {
                    assert_eq!(content_type, ct);
                }
                other => panic!("expected UnsupportedContentType, got {other}"),
            }
        }
    }
}
