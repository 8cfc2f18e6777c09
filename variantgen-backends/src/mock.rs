//! Mock backend for testing.

use crate::backend::{CompletionBackend, RawCompletion};
use crate::error::BackendError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A mock backend with a queue of pre-configured outcomes.
///
/// Outcomes are returned in order; once the queue is empty the mock
/// falls back to an empty JSON object. Every prompt it receives is
/// recorded for later assertions.
///
/// # Example
///
/// ```rust
/// use variantgen_backends::MockBackend;
///
/// let backend = MockBackend::new("test")
///     .with_response(r#"{"meta": {"title": "First"}}"#)
///     .with_response(r#"{"meta": {"title": "Second"}}"#);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    name: String,
    available: bool,
    outcomes: Arc<Mutex<Vec<Result<String, BackendError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            outcomes: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful completion.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: BackendError) -> Self {
        self.outcomes.lock().unwrap().push(Err(error));
        self
    }

    /// Mark the backend unavailable.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Get recorded prompts.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Clear recorded prompts.
    pub fn clear_prompts(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(&self, prompt: &str) -> Result<RawCompletion, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            Ok(RawCompletion::new("{}", self.name.clone()))
        } else {
            outcomes
                .remove(0)
                .map(|text| RawCompletion::new(text, self.name.clone()))
        }
    }
}
