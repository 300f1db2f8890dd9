//! Configuration types: the OCR credential and the pipeline knobs.
//!
//! All pipeline behaviour is controlled through [`OcrConfig`], built via its
//! [`OcrConfigBuilder`]. The credential is an explicit, immutable field of the
//! config rather than ambient process state, so it is threaded into the
//! service client at construction and never mutated afterwards.
//!
//! # Design choice: builder over constructor
//! A constructor taking every knob is unreadable and breaks on every new
//! field. The builder lets callers set only what they care about and rely on
//! documented defaults for the rest.

use crate::error::OcrError;
use crate::service::OcrService;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// JSON key holding the API token in the configuration file.
pub const CREDENTIAL_KEY: &str = "MISTRAL_API_KEY";

/// Environment variable that overrides the configuration file when set.
pub const CREDENTIAL_ENV: &str = "MISTRAL_API_KEY";

/// Default configuration file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// An opaque API token for the remote OCR service.
///
/// Loaded once at startup and immutable afterwards. The token is never
/// printed: `Debug` is redacted so configs can be logged safely.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap an already-obtained token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Resolve the credential: the `MISTRAL_API_KEY` environment variable
    /// when set and non-empty, otherwise the JSON configuration file.
    ///
    /// Any failure here is fatal — the pipeline must not proceed without a
    /// credential.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, OcrError> {
        if let Ok(token) = std::env::var(CREDENTIAL_ENV) {
            if !token.is_empty() {
                debug!("Using credential from ${}", CREDENTIAL_ENV);
                return Ok(Self(token));
            }
        }
        Self::from_file(config_path)
    }

    /// Read the credential from a JSON configuration file containing a
    /// `MISTRAL_API_KEY` string entry.
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, OcrError> {
        let path = config_path.as_ref();

        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OcrError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                OcrError::ConfigUnreadable {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| OcrError::ConfigMalformed {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;

        let token = value
            .get(CREDENTIAL_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OcrError::CredentialMissing {
                path: path.to_path_buf(),
                key: CREDENTIAL_KEY,
            })?;

        debug!("Loaded credential from {}", path.display());
        Ok(Self(token.to_string()))
    }

    /// Access the raw token, e.g. for an `Authorization: Bearer` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Configuration for an OCR run.
///
/// Built via [`OcrConfig::builder()`] or [`OcrConfig::default()`].
///
/// # Example
/// ```rust
/// use ocr2md::{Credential, OcrConfig};
///
/// let config = OcrConfig::builder()
///     .credential(Credential::new("sk-test"))
///     .model("mistral-ocr-latest")
///     .output_dir("out")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct OcrConfig {
    /// API credential for the remote OCR service. Required unless a
    /// pre-built [`service`](Self::service) is supplied.
    pub credential: Option<Credential>,

    /// OCR model identifier. Default: `mistral-ocr-latest`.
    pub model: String,

    /// Base URL of the OCR service API. Default: `https://api.mistral.ai`.
    pub base_url: String,

    /// Timeout for each HTTP call in seconds. Default: 120.
    ///
    /// There is one timeout knob, applied uniformly by the HTTP client. The
    /// pipeline itself enforces no deadlines.
    pub timeout_secs: u64,

    /// Directory the rendered markdown file is written into. Default: `.`.
    pub output_dir: PathBuf,

    /// Whether to persist the rendered markdown at all. Default: true.
    pub save_output: bool,

    /// Pre-constructed OCR service. Takes precedence over building a
    /// [`crate::service::MistralClient`] from the credential. Useful in
    /// tests or when the caller needs custom middleware.
    pub service: Option<Arc<dyn OcrService>>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            credential: None,
            model: "mistral-ocr-latest".to_string(),
            base_url: "https://api.mistral.ai".to_string(),
            timeout_secs: 120,
            output_dir: PathBuf::from("."),
            save_output: true,
            service: None,
        }
    }
}

impl fmt::Debug for OcrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcrConfig")
            .field("credential", &self.credential)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("save_output", &self.save_output)
            .field("service", &self.service.as_ref().map(|_| "<dyn OcrService>"))
            .finish()
    }
}

impl OcrConfig {
    /// Create a new builder for `OcrConfig`.
    pub fn builder() -> OcrConfigBuilder {
        OcrConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`OcrConfig`].
#[derive(Debug)]
pub struct OcrConfigBuilder {
    config: OcrConfig,
}

impl OcrConfigBuilder {
    pub fn credential(mut self, credential: Credential) -> Self {
        self.config.credential = Some(credential);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs.max(1);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn save_output(mut self, v: bool) -> Self {
        self.config.save_output = v;
        self
    }

    pub fn service(mut self, service: Arc<dyn OcrService>) -> Self {
        self.config.service = Some(service);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<OcrConfig, OcrError> {
        let c = &self.config;
        if c.model.is_empty() {
            return Err(OcrError::InvalidConfig("model must not be empty".into()));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(OcrError::InvalidConfig(format!(
                "base_url must be an HTTP(S) URL, got '{}'",
                c.base_url
            )));
        }
        if c.credential.is_none() && c.service.is_none() {
            return Err(OcrError::InvalidConfig(
                "either a credential or a pre-built service is required".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        f.write_all(contents.as_bytes()).expect("write");
        f
    }

    #[test]
    fn from_file_reads_key() {
        let f = write_config(r#"{"MISTRAL_API_KEY": "sk-123"}"#);
        let cred = Credential::from_file(f.path()).expect("load should succeed");
        assert_eq!(cred.expose(), "sk-123");
    }

    #[test]
    fn from_file_missing_file() {
        let err = Credential::from_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, OcrError::ConfigNotFound { .. }), "got: {err}");
    }

    #[test]
    fn from_file_malformed_json() {
        let f = write_config("{not json");
        let err = Credential::from_file(f.path()).unwrap_err();
        assert!(matches!(err, OcrError::ConfigMalformed { .. }), "got: {err}");
    }

    #[test]
    fn from_file_missing_key() {
        let f = write_config(r#"{"OTHER_KEY": "x"}"#);
        let err = Credential::from_file(f.path()).unwrap_err();
        assert!(
            matches!(err, OcrError::CredentialMissing { .. }),
            "got: {err}"
        );
    }

    #[test]
    fn from_file_empty_key_is_missing() {
        let f = write_config(r#"{"MISTRAL_API_KEY": ""}"#);
        let err = Credential::from_file(f.path()).unwrap_err();
        assert!(
            matches!(err, OcrError::CredentialMissing { .. }),
            "got: {err}"
        );
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("sk-secret");
        let dbg = format!("{:?}", cred);
        assert!(!dbg.contains("sk-secret"), "token leaked: {dbg}");
    }

    #[test]
    fn builder_requires_credential_or_service() {
        let err = OcrConfig::builder().build().unwrap_err();
        assert!(matches!(err, OcrError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_bad_base_url() {
        let err = OcrConfig::builder()
            .credential(Credential::new("k"))
            .base_url("ftp://api.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, OcrError::InvalidConfig(_)));
    }

    #[test]
    fn builder_defaults() {
        let config = OcrConfig::builder()
            .credential(Credential::new("k"))
            .build()
            .unwrap();
        assert_eq!(config.model, "mistral-ocr-latest");
        assert_eq!(config.base_url, "https://api.mistral.ai");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.save_output);
    }
}
