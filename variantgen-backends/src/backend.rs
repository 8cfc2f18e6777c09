//! The completion backend abstraction.

use crate::error::BackendError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A raw completion returned by a backend, before any extraction or
/// repair has touched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    /// The completion text exactly as the backend returned it.
    pub text: String,
    /// Name of the backend that produced it.
    pub backend: String,
    /// When the completion arrived.
    pub timestamp: DateTime<Utc>,
}

impl RawCompletion {
    /// Create a completion stamped with the current time.
    pub fn new(text: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            backend: backend.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether the completion holds no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A source of text completions.
///
/// Implementations wrap one remote generation API (or a test double)
/// behind a uniform prompt-in, text-out interface. Availability is a
/// cheap local check so callers can skip a backend whose credentials
/// are absent without paying for a failed request.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name, used in logs and generation metadata.
    fn name(&self) -> &str;

    /// Whether the backend is configured well enough to try a request.
    fn is_available(&self) -> bool;

    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<RawCompletion, BackendError>;
}
