//! Error types for the ocr2md library.
//!
//! A single [`OcrError`] enum covers every failure mode, grouped by where it
//! occurs in the pipeline:
//!
//! * **Configuration** — the credential file is absent, unreadable, malformed,
//!   or missing the API key. Fatal at startup: nothing can run without a
//!   credential.
//! * **Classification** — the document's suffix or `Content-Type` is not a
//!   supported PDF/image kind. Raised before any OCR call is made.
//! * **Service** — the remote OCR API rejected a call. The service's own
//!   message is carried verbatim; there are no local retries.
//! * **File access / output** — local reads and the markdown write. An output
//!   write failure is recoverable: the assembled result is still returned to
//!   the caller with the failure recorded alongside it (see
//!   [`crate::output::OcrOutput::save_error`]).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the ocr2md library.
#[derive(Debug, Error)]
pub enum OcrError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// Credential file was not found at the given path.
    #[error("Configuration file not found: '{path}'\nCreate it with: {{\"MISTRAL_API_KEY\": \"<your key>\"}}")]
    ConfigNotFound { path: PathBuf },

    /// Credential file exists but could not be read.
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential file is not a valid JSON object.
    #[error("Configuration file '{path}' is not valid JSON: {detail}")]
    ConfigMalformed { path: PathBuf, detail: String },

    /// Credential file parsed but the API key entry is absent or empty.
    #[error("Configuration file '{path}' has no '{key}' entry")]
    CredentialMissing { path: PathBuf, key: &'static str },

    // ── Classification errors ─────────────────────────────────────────────
    /// Local file suffix is not one of .pdf, .png, .jpg, .jpeg.
    #[error("Unsupported file type: '{path}'\nSupported suffixes: .pdf, .png, .jpg, .jpeg")]
    UnsupportedExtension { path: PathBuf },

    /// URL's Content-Type header names neither a PDF nor a supported image.
    #[error("Unsupported content type '{content_type}' at '{url}'\nPlease provide a URL to a PDF or an image.")]
    UnsupportedContentType { url: String, content_type: String },

    /// The header-only request used to classify a URL failed.
    #[error("Failed to fetch content type for '{url}': {reason}")]
    HeaderFetch { url: String, reason: String },

    // ── File access errors ────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other local read failure.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Service errors ────────────────────────────────────────────────────
    /// Transport-level failure talking to the OCR service.
    #[error("OCR service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The OCR service rejected a call; its message is passed through verbatim.
    #[error("OCR service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Uploading the document to the service's object store failed.
    #[error("Failed to upload '{filename}' for OCR: {detail}")]
    UploadFailed { filename: String, detail: String },

    /// Retrieving the signed URL for an uploaded object failed.
    #[error("Failed to obtain a signed URL for uploaded file '{file_id}': {detail}")]
    SignedUrlFailed { file_id: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_display_names_the_key() {
        let e = OcrError::ConfigNotFound {
            path: PathBuf::from("config.json"),
        };
        let msg = e.to_string();
        assert!(msg.contains("config.json"), "got: {msg}");
        assert!(msg.contains("MISTRAL_API_KEY"), "got: {msg}");
    }

    #[test]
    fn unsupported_extension_lists_suffixes() {
        let e = OcrError::UnsupportedExtension {
            path: PathBuf::from("notes.txt"),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains(".pdf"));
        assert!(msg.contains(".jpeg"));
    }

    #[test]
    fn unsupported_content_type_display() {
        let e = OcrError::UnsupportedContentType {
            url: "https://example.com/page".into(),
            content_type: "text/html".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("text/html"));
        assert!(msg.contains("https://example.com/page"));
    }

    #[test]
    fn api_error_carries_service_message_verbatim() {
        let e = OcrError::Api {
            status: 422,
            message: "document exceeds page limit".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("document exceeds page limit"));
    }

    #[test]
    fn credential_missing_display() {
        let e = OcrError::CredentialMissing {
            path: PathBuf::from("/etc/ocr2md/config.json"),
            key: "MISTRAL_API_KEY",
        };
        assert!(e.to_string().contains("MISTRAL_API_KEY"));
    }
}
