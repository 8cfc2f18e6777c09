//! Error types for output extraction.

use thiserror::Error;

/// Errors from locating and parsing a JSON object in model output.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No JSON object could be located anywhere in the output.
    #[error("no JSON object found in model output")]
    NotFound,

    /// A candidate object was located but still failed to parse after
    /// every repair pass.
    #[error("extracted JSON did not parse after repair: {0}")]
    Unparsable(#[source] serde_json::Error),
}

impl ExtractError {
    /// Whether retrying generation with a fresh completion could help.
    ///
    /// Both variants are caused by output content rather than transport,
    /// so a new completion is the only recourse.
    pub fn is_retryable(&self) -> bool {
        true
    }
}
