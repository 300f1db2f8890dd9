//! Document submission: build the right request for each source kind and
//! drive the remote OCR call.
//!
//! Three submission shapes exist:
//!
//! * **Local PDF** — upload to the service's object store (`purpose=ocr`),
//!   fetch a time-limited signed URL, OCR against that URL, then delete the
//!   uploaded object. Deletion happens on success AND failure of the OCR
//!   call: the object must never outlive its submission.
//! * **Local image** — read bytes, base64-encode, submit inline as a `data:`
//!   URI. No upload round trip.
//! * **URL** — pass the URL through to the service unmodified; no local
//!   download.
//!
//! Every request asks for inline base64 image payloads so the assembler can
//! work without further network calls.

use crate::error::OcrError;
use crate::pipeline::classify::DocumentKind;
use crate::pipeline::encode;
use crate::service::{DocumentSource, OcrResponse, OcrService};
use std::path::Path;
use tracing::{info, warn};

/// Submit a local PDF via the upload/sign/delete round trip.
pub async fn pdf_file(service: &dyn OcrService, path: &Path) -> Result<OcrResponse, OcrError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf");
    let bytes = encode::read_file(path).await?;

    let file_id = service.upload_for_ocr(filename, bytes).await?;

    // The uploaded object is scoped to this submission: run the remaining
    // steps, then delete it whether or not they succeeded.
    let processed = process_uploaded(service, &file_id).await;

    if let Err(e) = service.delete_file(&file_id).await {
        warn!("Failed to delete uploaded file '{}': {}", file_id, e);
    } else {
        info!("Deleted uploaded file '{}'", file_id);
    }

    processed
}

async fn process_uploaded(
    service: &dyn OcrService,
    file_id: &str,
) -> Result<OcrResponse, OcrError> {
    let signed = service.signed_url(file_id).await?;
    let document = DocumentSource::DocumentUrl {
        document_url: signed,
    };
    service.process(&document, true).await
}

/// Submit a local image inline as a base64 `data:` URI.
pub async fn image_file(service: &dyn OcrService, path: &Path) -> Result<OcrResponse, OcrError> {
    let data_uri = encode::image_data_uri(path).await?;
    let document = DocumentSource::ImageUrl {
        image_url: data_uri,
    };
    service.process(&document, true).await
}

/// Submit an already-classified URL directly.
pub async fn by_url(
    service: &dyn OcrService,
    url: &str,
    kind: DocumentKind,
) -> Result<OcrResponse, OcrError> {
    let document = match kind {
        DocumentKind::Pdf => DocumentSource::DocumentUrl {
            document_url: url.to_string(),
        },
        DocumentKind::Image => DocumentSource::ImageUrl {
            image_url: url.to_string(),
        },
    };
    service.process(&document, true).await
}
