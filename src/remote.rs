//! Remote conversion client (the "premium" path).
//!
//! A single multipart upload to the configured endpoint, followed by one
//! GET per result file. No retry or backoff: one attempt per user
//! action, and any failure is reported back so the caller can decide
//! whether to fall back to the local path.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::Deserialize;

/// Outcome of a remote conversion attempt.
///
/// Failures that the local path can compensate for are returned as
/// [`RemoteOutcome::FallbackAdvised`] rather than as hard errors, so the
/// presentation layer owns the decision to prompt and fall back.
#[derive(Debug)]
pub enum RemoteOutcome {
    /// The remote service produced the converted document.
    Converted(Vec<u8>),
    /// The remote attempt failed; the local path may be tried instead.
    FallbackAdvised {
        /// Why the remote attempt failed
        reason: Error,
    },
}

/// Response payload of the conversion endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    /// Result files produced by the conversion
    #[serde(rename = "Files", default)]
    pub files: Vec<ApiFile>,
}

/// One result file entry.
#[derive(Debug, Deserialize)]
pub struct ApiFile {
    /// Download URL for the converted file
    #[serde(rename = "Url")]
    pub url: String,

    /// Result filename as reported by the service
    #[serde(rename = "FileName", default)]
    pub file_name: Option<String>,

    /// Result size in bytes as reported by the service
    #[serde(rename = "FileSize", default)]
    pub file_size: Option<u64>,
}

/// Client for the remote conversion service.
pub struct RemoteConverter {
    client: reqwest::Client,
    endpoint: String,
    secret: String,
    ocr: bool,
}

impl RemoteConverter {
    /// Create a client from the session configuration.
    ///
    /// Fails when the remote path is disabled or no credential is
    /// configured; no compiled-in default exists.
    pub fn new(config: &Config) -> Result<Self> {
        if !config.api_enabled {
            return Err(Error::Api("remote conversion is disabled".to_string()));
        }
        let secret = config
            .api_secret
            .clone()
            .ok_or(Error::MissingCredential)?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            secret,
            ocr: config.ocr,
        })
    }

    /// Upload the file and fetch the converted result. Single attempt.
    pub async fn convert(&self, filename: &str, data: Vec<u8>) -> Result<Vec<u8>> {
        log::info!("uploading {} ({} bytes) for remote conversion", filename, data.len());

        let mut form = reqwest::multipart::Form::new()
            .part(
                "File",
                reqwest::multipart::Part::bytes(data).file_name(filename.to_string()),
            )
            .text("StoreFile", "true");
        if self.ocr {
            form = form.text("EnableOcr", "true");
        }

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("Secret", self.secret.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Api(format!("upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!("conversion request failed: HTTP {status}")));
        }

        let payload: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("malformed response: {e}")))?;

        let file = payload
            .files
            .first()
            .ok_or_else(|| Error::Api("response contained no result files".to_string()))?;

        log::info!(
            "fetching result {} ({} bytes)",
            file.file_name.as_deref().unwrap_or("<unnamed>"),
            file.file_size.unwrap_or(0)
        );
        self.fetch(&file.url).await
    }

    /// Like [`convert`](Self::convert), but folds failures into
    /// [`RemoteOutcome::FallbackAdvised`].
    pub async fn convert_or_advise(&self, filename: &str, data: Vec<u8>) -> RemoteOutcome {
        match self.convert(filename, data).await {
            Ok(bytes) => RemoteOutcome::Converted(bytes),
            Err(reason) => {
                log::warn!("remote conversion failed: {reason}");
                RemoteOutcome::FallbackAdvised { reason }
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("result download failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!("result download failed: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Api(format!("result download failed: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_credential() {
        let config = Config::default();
        let result = RemoteConverter::new(&config);
        assert!(matches!(result, Err(Error::MissingCredential)));
    }

    #[test]
    fn test_requires_enabled_api() {
        let config = Config::default()
            .with_api_secret("s3cret")
            .with_api_enabled(false);
        let result = RemoteConverter::new(&config);
        assert!(matches!(result, Err(Error::Api(_))));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "ConversionCost": 1,
            "Files": [
                { "FileName": "paper.docx", "FileExt": "docx", "FileSize": 1234,
                  "Url": "https://example.com/d/paper.docx" }
            ]
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].file_name.as_deref(), Some("paper.docx"));
        assert_eq!(response.files[0].file_size, Some(1234));
    }

    #[test]
    fn test_response_without_files() {
        let response: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.files.is_empty());
    }
}
