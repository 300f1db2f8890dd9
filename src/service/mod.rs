//! The remote OCR service boundary.
//!
//! Everything the pipeline needs from the service is captured by the
//! [`OcrService`] trait: upload an object for OCR, obtain a time-limited
//! signed URL for it, delete it, and run OCR over a document descriptor.
//! [`MistralClient`] is the production implementation; tests inject an
//! in-memory fake through [`crate::config::OcrConfig::service`].
//!
//! The wire types mirror the service's JSON shapes directly so responses
//! deserialise without an intermediate representation. Pages keep the order
//! the service returned them in; nothing here reorders or rewrites them.

pub mod mistral;

pub use mistral::MistralClient;

use crate::error::OcrError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Document descriptor accepted by the OCR endpoint.
///
/// Either a URL to a full document (PDF) or a URL to a single image —
/// including `data:` URIs carrying inline base64 image bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentSource {
    /// A PDF document, by HTTP(S) or signed URL.
    #[serde(rename = "document_url")]
    DocumentUrl { document_url: String },
    /// An image, by HTTP(S) URL or inline `data:` URI.
    #[serde(rename = "image_url")]
    ImageUrl { image_url: String },
}

/// One OCR'd page: markdown text plus the images the service extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrPage {
    /// 0-based page index, as returned by the service.
    #[serde(default)]
    pub index: usize,
    /// The page content as markdown. Image references use the
    /// `![id](id)` placeholder form until the assembler inlines them.
    pub markdown: String,
    /// Images referenced from this page's markdown.
    #[serde(default)]
    pub images: Vec<OcrImage>,
}

/// An image extracted from a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrImage {
    /// Identifier used by the `![id](id)` placeholder in the page markdown.
    pub id: String,
    /// Base64 payload, present when the OCR call requested inline images.
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// Usage accounting the service attaches to a response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageInfo {
    #[serde(default)]
    pub pages_processed: usize,
    #[serde(default)]
    pub doc_size_bytes: Option<u64>,
}

/// The full OCR response: an ordered sequence of pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResponse {
    pub pages: Vec<OcrPage>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage_info: Option<UsageInfo>,
}

/// Operations the pipeline consumes from the remote OCR service.
///
/// Object-safe so a fake can stand in for the real client; the pipeline only
/// ever holds an `Arc<dyn OcrService>`.
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Upload document bytes to the service's object store with
    /// `purpose=ocr`. Returns the remote object's id.
    async fn upload_for_ocr(&self, filename: &str, bytes: Vec<u8>) -> Result<String, OcrError>;

    /// Obtain a time-limited signed URL for an uploaded object.
    async fn signed_url(&self, file_id: &str) -> Result<String, OcrError>;

    /// Delete an uploaded object from the service's store.
    async fn delete_file(&self, file_id: &str) -> Result<(), OcrError>;

    /// Run OCR over the given document. When `include_image_base64` is set
    /// the response carries each image's base64 payload inline, so the
    /// assembler needs no further network calls.
    async fn process(
        &self,
        document: &DocumentSource,
        include_image_base64: bool,
    ) -> Result<OcrResponse, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_serialises_with_type_tag() {
        let doc = DocumentSource::DocumentUrl {
            document_url: "https://example.com/paper.pdf".into(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "document_url");
        assert_eq!(json["document_url"], "https://example.com/paper.pdf");
    }

    #[test]
    fn image_url_serialises_with_type_tag() {
        let doc = DocumentSource::ImageUrl {
            image_url: "data:image/png;base64,QUFB".into(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "image_url");
        assert_eq!(json["image_url"], "data:image/png;base64,QUFB");
    }

    #[test]
    fn response_deserialises_with_missing_optionals() {
        let json = r##"{
            "pages": [
                {"markdown": "# Title"},
                {"index": 1, "markdown": "Body", "images": [{"id": "fig1"}]}
            ]
        }"##;
        let response: OcrResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pages.len(), 2);
        assert_eq!(response.pages[0].index, 0);
        assert!(response.pages[0].images.is_empty());
        assert_eq!(response.pages[1].images[0].id, "fig1");
        assert!(response.pages[1].images[0].image_base64.is_none());
        assert!(response.model.is_none());
    }
}
