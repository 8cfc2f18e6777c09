//! Shared HTTP client utilities.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create an API client with default settings.
pub(crate) fn create_client() -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(300))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// OpenAI-style API error response.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct ErrorDetail {
    /// Error message.
    pub message: String,
    /// Error code.
    pub code: Option<String>,
}

/// Parse the retry-after header from a response, in seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}
