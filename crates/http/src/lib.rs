//! # sheetpick-http
//!
//! Downloads workbook files linked by URL so they can be handed to the
//! extractor as bytes.
//!
//! Supports HTTP/2 via ALPN negotiation with fallback to HTTP/1.1.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while downloading a file.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} - {reason}")]
    Status { status: u16, reason: String },
}

pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client for workbook downloads.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Constructs a new `HttpClient` with the default 30-second timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Client` if building the underlying HTTP client fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetpick_http::HttpClient;
    /// let client = HttpClient::new().expect("failed to create HttpClient");
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Constructs an `HttpClient` with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Client` if building the underlying HTTP client fails.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Download the body at `url`.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Request` on transport failures and
    /// `HttpError::Status` for non-success responses.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let request_error = |e: reqwest::Error| HttpError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        debug!(url, bytes = body.len(), "downloaded workbook");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_new() {
        assert!(HttpClient::new().is_ok());
    }

    #[test]
    fn test_http_client_with_timeout() {
        assert!(HttpClient::with_timeout(10).is_ok());
        assert!(HttpClient::with_timeout(120).is_ok());
    }

    #[test]
    fn test_status_error_message() {
        let err = HttpError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 - Not Found");
    }
}
