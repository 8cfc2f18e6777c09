//! # variantgen-backends
//!
//! Completion backends for the variantgen pipeline.
//!
//! A backend turns a prompt into raw completion text. Two real
//! backends are provided, plus a mock for tests:
//!
//! - **[`CompletionApiBackend`]**: the platform's own
//!   `/api/generateText` endpoint, authenticated with a session cookie
//! - **[`ResearchBackend`]**: the Perplexity chat-completions API with
//!   its online `sonar` model, for copy grounded in current search
//!   results
//! - **[`MockBackend`]**: queued canned outcomes with prompt recording
//!
//! All backends implement [`CompletionBackend`] and report whether
//! their credentials are configured via
//! [`is_available`](CompletionBackend::is_available), so callers can
//! pick a working backend without issuing a doomed request.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod backend;
mod client;
pub mod completion;
pub mod error;
pub mod mock;
pub mod research;

pub use backend::{CompletionBackend, RawCompletion};
pub use completion::CompletionApiBackend;
pub use error::{BackendError, BackendResult};
pub use mock::MockBackend;
pub use research::ResearchBackend;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        BackendError, CompletionApiBackend, CompletionBackend, MockBackend, RawCompletion,
        ResearchBackend,
    };
}
