//! Conversion configuration.
//!
//! The remote API credential is sourced exclusively from the environment;
//! there is no compiled-in default.

use serde::Serialize;

/// Primary environment variable for the API credential.
pub const API_SECRET_ENV: &str = "TODOCX_API_SECRET";

/// Fallback environment variable, matching the upstream service's naming.
pub const API_SECRET_ENV_FALLBACK: &str = "CONVERTAPI_SECRET";

/// Default conversion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://v2.convertapi.com/convert/pdf/to/docx";

/// Default maximum input size in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Conversion settings.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// API credential for the remote conversion service.
    #[serde(skip_serializing)]
    pub api_secret: Option<String>,

    /// Whether the remote path may be used at all.
    pub api_enabled: bool,

    /// Remote conversion endpoint.
    pub endpoint: String,

    /// Maximum accepted input size in megabytes.
    pub max_file_size_mb: u64,

    /// Request OCR for scanned PDFs on the remote path.
    pub ocr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_secret: None,
            api_enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            ocr: false,
        }
    }
}

impl Config {
    /// Create a config with defaults and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with the credential read from the environment.
    ///
    /// Checks `TODOCX_API_SECRET` first, then `CONVERTAPI_SECRET`.
    /// A missing credential is not an error here; it only becomes one
    /// when a remote conversion is actually requested.
    pub fn from_env() -> Self {
        let api_secret = std::env::var(API_SECRET_ENV)
            .or_else(|_| std::env::var(API_SECRET_ENV_FALLBACK))
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            api_secret,
            ..Self::default()
        }
    }

    /// Set the API credential.
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// Enable or disable the remote path.
    pub fn with_api_enabled(mut self, enabled: bool) -> Self {
        self.api_enabled = enabled;
        self
    }

    /// Override the remote endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the maximum input size in megabytes.
    pub fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Request OCR on the remote path.
    pub fn with_ocr(mut self, ocr: bool) -> Self {
        self.ocr = ocr;
        self
    }

    /// Maximum accepted input size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// True when the remote path is enabled and a credential is present.
    pub fn remote_available(&self) -> bool {
        self.api_enabled && self.api_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credential() {
        let config = Config::default();
        assert!(config.api_secret.is_none());
        assert!(!config.remote_available());
        assert_eq!(config.max_file_size_mb, 10);
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_api_secret("s3cret")
            .with_ocr(true)
            .with_max_file_size_mb(25);
        assert!(config.remote_available());
        assert!(config.ocr);
        assert_eq!(config.max_file_size_bytes(), 25 * 1024 * 1024);
    }

    #[test]
    fn test_disabled_api_is_not_available() {
        let config = Config::new()
            .with_api_secret("s3cret")
            .with_api_enabled(false);
        assert!(!config.remote_available());
    }

    #[test]
    fn test_secret_not_serialized() {
        let config = Config::new().with_api_secret("s3cret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("max_file_size_mb"));
    }
}
