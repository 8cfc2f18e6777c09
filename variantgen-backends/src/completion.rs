//! The first-party text generation API backend.
//!
//! Posts a prompt to the platform's `/api/generateText` endpoint and
//! returns the response body verbatim. Authentication rides on a
//! `next-auth` session cookie rather than an API key header.

use crate::backend::{CompletionBackend, RawCompletion};
use crate::client::create_client;
use crate::error::BackendError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct GenerateTextRequest<'a> {
    prompt: &'a str,
    #[serde(rename = "noNeedLogin")]
    no_need_login: bool,
}

/// Backend for the platform's own text generation endpoint.
#[derive(Debug, Clone)]
pub struct CompletionApiBackend {
    client: Client,
    base_url: String,
    session_token: Option<String>,
    default_timeout: Duration,
}

impl CompletionApiBackend {
    /// Create a backend for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: create_client(),
            base_url: base_url.into(),
            session_token: None,
            default_timeout: Duration::from_secs(120),
        }
    }

    /// Create from `VARIANTGEN_API_BASE_URL` and, if set,
    /// `VARIANTGEN_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self, BackendError> {
        let base_url = std::env::var("VARIANTGEN_API_BASE_URL")
            .map_err(|_| BackendError::configuration("VARIANTGEN_API_BASE_URL not set"))?;
        let mut backend = Self::new(base_url);
        if let Ok(token) = std::env::var("VARIANTGEN_SESSION_TOKEN") {
            backend = backend.with_session_token(token);
        }
        Ok(backend)
    }

    /// Set the session token sent as a `next-auth` cookie.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionBackend for CompletionApiBackend {
    fn name(&self) -> &str {
        "completion-api"
    }

    fn is_available(&self) -> bool {
        !self.base_url.trim().is_empty() && self.session_token.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<RawCompletion, BackendError> {
        let body = GenerateTextRequest {
            prompt,
            no_need_login: true,
        };

        let mut request = self
            .client
            .post(format!("{}/api/generateText", self.base_url))
            .header("Content-Type", "application/json")
            .timeout(self.default_timeout);

        if let Some(ref token) = self.session_token {
            request = request.header("Cookie", format!("next-auth.session-token={token}"));
        }

        tracing::debug!(backend = self.name(), prompt_len = prompt.len(), "sending completion request");
        let response = request.json(&body).send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            if status == 401 {
                return Err(BackendError::auth(body));
            }
            if status == 429 {
                return Err(BackendError::rate_limited(crate::client::parse_retry_after(
                    &headers,
                )));
            }
            return Err(BackendError::http(status, body));
        }

        // The endpoint streams back plain text, not a JSON envelope.
        let text = response.text().await?;
        Ok(RawCompletion::new(text, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_requires_base_url_and_token() {
        let configured =
            CompletionApiBackend::new("http://localhost:3000").with_session_token("tok");
        assert!(configured.is_available());

        // Without a session token every request would come back 401, so
        // the backend must not be offered to strategy selection.
        assert!(!CompletionApiBackend::new("http://localhost:3000").is_available());
        assert!(!CompletionApiBackend::new("   ").with_session_token("tok").is_available());
    }

    #[test]
    fn test_builder_setters() {
        let backend = CompletionApiBackend::new("http://localhost:3000")
            .with_session_token("tok")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(backend.base_url(), "http://localhost:3000");
        assert_eq!(backend.name(), "completion-api");
    }
}
