//! Local file reading and inline image encoding.
//!
//! The OCR endpoint accepts images as base64 `data:` URIs embedded directly
//! in the JSON request body, which spares the upload/signed-URL/delete round
//! trip that PDFs need. The MIME type in the URI is taken from the file
//! suffix so PNGs are not mislabelled as JPEGs.

use crate::error::OcrError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// Read a local file, mapping io errors to the crate's file-access variants.
///
/// Used for every local read in the pipeline — PDFs headed for upload as
/// well as images headed for inline encoding — so missing files and
/// permission problems surface uniformly.
pub async fn read_file(path: &Path) -> Result<Vec<u8>, OcrError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(OcrError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(OcrError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// MIME type for a local image file, from its suffix.
pub fn image_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        _ => "image/jpeg",
    }
}

/// Read a local image and encode it as a base64 `data:` URI ready for
/// inline submission.
pub async fn image_data_uri(path: &Path) -> Result<String, OcrError> {
    let bytes = read_file(path).await?;
    let b64 = STANDARD.encode(&bytes);
    debug!("Encoded {} → {} bytes base64", path.display(), b64.len());
    Ok(format!("data:{};base64,{}", image_mime_type(path), b64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mime_type_from_suffix() {
        assert_eq!(image_mime_type(Path::new("a.png")), "image/png");
        assert_eq!(image_mime_type(Path::new("a.PNG")), "image/png");
        assert_eq!(image_mime_type(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("a.jpeg")), "image/jpeg");
    }

    #[tokio::test]
    async fn data_uri_round_trips() {
        let mut f = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("tempfile");
        f.write_all(b"\x89PNG fake bytes").expect("write");

        let uri = image_data_uri(f.path()).await.expect("encode");
        let payload = uri
            .strip_prefix("data:image/png;base64,")
            .expect("data URI prefix");
        let decoded = STANDARD.decode(payload).expect("valid base64");
        assert_eq!(decoded, b"\x89PNG fake bytes");
    }

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let err = read_file(Path::new("/nonexistent/scan.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::FileNotFound { .. }), "got: {err}");
    }
}
