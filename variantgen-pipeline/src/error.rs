//! Pipeline error types.

use thiserror::Error;
use variantgen_backends::BackendError;
use variantgen_output::RepairTrace;

/// Errors that end a generation attempt.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The backend could not produce a completion.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),

    /// The completion held no JSON that could be made to parse.
    #[error("model output could not be parsed as JSON ({n} repairs attempted)", n = .trace.steps.len())]
    UnparsableOutput {
        /// The raw completion text, for diagnostics.
        raw: String,
        /// The repairs that were attempted.
        trace: RepairTrace,
    },

    /// No registered strategy is available.
    #[error("no generation strategy is available")]
    NoStrategyAvailable,
}

impl PipelineError {
    /// Whether retrying the attempt could help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::BackendUnavailable(err) => err.is_retryable(),
            // A fresh completion may well parse.
            PipelineError::UnparsableOutput { .. } => true,
            PipelineError::NoStrategyAvailable => false,
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
