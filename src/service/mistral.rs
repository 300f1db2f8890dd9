//! Mistral OCR HTTP client.
//!
//! A thin reqwest wrapper over the four endpoints the pipeline uses:
//!
//! | Call | Endpoint |
//! |------|----------|
//! | upload for OCR | `POST /v1/files` (multipart, `purpose=ocr`) |
//! | signed URL     | `GET /v1/files/{id}/url` |
//! | delete         | `DELETE /v1/files/{id}` |
//! | process        | `POST /v1/ocr` |
//!
//! No retries anywhere: whatever the service rejects is surfaced verbatim to
//! the caller as [`OcrError::Api`]. Timeouts come from the single client-wide
//! timeout configured in [`OcrConfig`].

use crate::config::{Credential, OcrConfig};
use crate::error::OcrError;
use crate::service::{DocumentSource, OcrResponse, OcrService};
use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the Mistral OCR API.
#[derive(Debug, Clone)]
pub struct MistralClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    credential: Credential,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SignedUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ProcessRequest<'a> {
    model: &'a str,
    document: &'a DocumentSource,
    include_image_base64: bool,
}

/// Error body shape used by the API; parsed loosely so an unexpected shape
/// still surfaces the raw text.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl MistralClient {
    /// Build a client from the config's credential, base URL, and timeout.
    pub fn new(config: &OcrConfig) -> Result<Self, OcrError> {
        let credential = config.credential.clone().ok_or_else(|| {
            OcrError::InvalidConfig("no credential configured for the OCR service".into())
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("ocr2md/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            "Mistral OCR client initialised"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credential,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-2xx response to [`OcrError::Api`], extracting the service's
/// `message` field when the body parses, otherwise passing the body through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, OcrError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    Err(OcrError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl OcrService for MistralClient {
    async fn upload_for_ocr(&self, filename: &str, bytes: Vec<u8>) -> Result<String, OcrError> {
        info!("Uploading '{}' ({} bytes) for OCR", filename, bytes.len());

        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new()
            .text("purpose", "ocr")
            .part("file", part);

        let response = self
            .http
            .post(self.endpoint("/v1/files"))
            .bearer_auth(self.credential.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| OcrError::UploadFailed {
                filename: filename.to_string(),
                detail: e.to_string(),
            })?;

        let uploaded: UploadedFile = check_status(response).await?.json().await?;
        debug!("Uploaded as file id {}", uploaded.id);
        Ok(uploaded.id)
    }

    async fn signed_url(&self, file_id: &str) -> Result<String, OcrError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/v1/files/{file_id}/url")))
            .bearer_auth(self.credential.expose())
            .send()
            .await
            .map_err(|e| OcrError::SignedUrlFailed {
                file_id: file_id.to_string(),
                detail: e.to_string(),
            })?;

        let signed: SignedUrl = check_status(response).await?.json().await?;
        debug!("Obtained signed URL for file id {}", file_id);
        Ok(signed.url)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), OcrError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/v1/files/{file_id}")))
            .bearer_auth(self.credential.expose())
            .send()
            .await?;

        check_status(response).await?;
        debug!("Deleted uploaded file id {}", file_id);
        Ok(())
    }

    async fn process(
        &self,
        document: &DocumentSource,
        include_image_base64: bool,
    ) -> Result<OcrResponse, OcrError> {
        let request = ProcessRequest {
            model: &self.model,
            document,
            include_image_base64,
        };

        info!(model = %self.model, "Submitting document for OCR");

        let response = self
            .http
            .post(self.endpoint("/v1/ocr"))
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()
            .await?;

        let parsed: OcrResponse = check_status(response).await?.json().await?;
        info!("OCR returned {} pages", parsed.pages.len());
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrConfig;

    fn test_config() -> OcrConfig {
        OcrConfig::builder()
            .credential(Credential::new("sk-test"))
            .base_url("https://api.example.test/")
            .build()
            .unwrap()
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = MistralClient::new(&test_config()).unwrap();
        assert_eq!(
            client.endpoint("/v1/ocr"),
            "https://api.example.test/v1/ocr"
        );
        assert_eq!(
            client.endpoint("/v1/files/abc/url"),
            "https://api.example.test/v1/files/abc/url"
        );
    }

    #[test]
    fn client_requires_credential() {
        let config = OcrConfig {
            credential: None,
            ..OcrConfig::default()
        };
        let err = MistralClient::new(&config).unwrap_err();
        assert!(matches!(err, OcrError::InvalidConfig(_)));
    }

    #[test]
    fn process_request_wire_shape() {
        let document = DocumentSource::DocumentUrl {
            document_url: "https://signed.example/abc".into(),
        };
        let request = ProcessRequest {
            model: "mistral-ocr-latest",
            document: &document,
            include_image_base64: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "mistral-ocr-latest");
        assert_eq!(json["include_image_base64"], true);
        assert_eq!(json["document"]["type"], "document_url");
    }
}
