//! Perplexity research backend.
//!
//! Uses the Perplexity chat-completions API with its `sonar` online
//! model, so generated copy can draw on current search results rather
//! than the model's training cut-off. Request parameters are pinned to
//! values tuned for factual, low-repetition SEO copy.

use crate::backend::{CompletionBackend, RawCompletion};
use crate::client::{create_client, parse_retry_after, ErrorResponse};
use crate::error::BackendError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Backend for the Perplexity research API.
#[derive(Debug, Clone)]
pub struct ResearchBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    default_timeout: Duration,
}

impl ResearchBackend {
    /// Perplexity API base URL.
    pub const BASE_URL: &'static str = "https://api.perplexity.ai";

    /// Default online research model.
    pub const DEFAULT_MODEL: &'static str = "sonar";

    /// Create a new research backend with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: create_client(),
            api_key: api_key.into(),
            base_url: Self::BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            default_timeout: Duration::from_secs(120),
        }
    }

    /// Create from environment variable `PERPLEXITY_API_KEY`.
    pub fn from_env() -> Result<Self, BackendError> {
        let api_key = std::env::var("PERPLEXITY_API_KEY")
            .map_err(|_| BackendError::configuration("PERPLEXITY_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Override the base URL, mainly for tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Handle API error response.
    fn handle_error_response(&self, status: u16, body: &str, headers: &HeaderMap) -> BackendError {
        if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
            let code = err.error.code.clone();

            if status == 401 {
                return BackendError::auth(err.error.message);
            }
            if status == 429 {
                return BackendError::rate_limited(parse_retry_after(headers));
            }

            return BackendError::Api {
                message: err.error.message,
                code,
            };
        }

        if status == 429 {
            return BackendError::rate_limited(parse_retry_after(headers));
        }

        BackendError::http(status, body)
    }
}

#[async_trait]
impl CompletionBackend for ResearchBackend {
    fn name(&self) -> &str {
        "perplexity-research"
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn generate(&self, prompt: &str) -> Result<RawCompletion, BackendError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: 2000,
            temperature: 0.2,
            top_p: 0.9,
            frequency_penalty: 1.0,
        };

        tracing::debug!(backend = self.name(), model = %self.model, "sending research request");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.default_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error_response(status, &body, &headers));
        }

        let resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::invalid_response(e.to_string()))?;

        let content = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| BackendError::invalid_response("response contained no choices"))?;

        Ok(RawCompletion::new(content, self.name()))
    }
}
