//! Generation outcomes and their metadata.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::time::Duration;
use uuid::Uuid;
use variantgen_core::VariantDocument;
use variantgen_output::ValidationWarning;

/// How reflection ended for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionStatus {
    /// Reflection produced a usable improved document.
    Improved,
    /// Reflection was attempted but its output was unusable; the
    /// pre-reflection document was kept unchanged.
    Skipped {
        /// Why the reflection output was rejected.
        reason: String,
    },
    /// Reflection was turned off for this request.
    Disabled,
}

/// Diagnostic record attached to every successful generation.
#[derive(Debug, Clone)]
pub struct GenerationMetadata {
    /// Unique id for this generation request.
    pub request_id: Uuid,
    /// Name of the backend that produced the accepted document.
    pub backend: String,
    /// How reflection ended.
    pub reflection: ReflectionStatus,
    /// Structural warnings from validation. Never fatal.
    pub warnings: Vec<ValidationWarning>,
    /// Elapsed time per pipeline stage, in execution order.
    pub timings: IndexMap<&'static str, Duration>,
    /// When the request completed.
    pub timestamp: DateTime<Utc>,
}

impl GenerationMetadata {
    /// Create metadata for a fresh request against `backend`.
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            backend: backend.into(),
            reflection: ReflectionStatus::Disabled,
            warnings: Vec::new(),
            timings: IndexMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Total time across all recorded stages.
    pub fn total_elapsed(&self) -> Duration {
        self.timings.values().sum()
    }
}

/// A successfully generated variant page plus its diagnostics.
#[derive(Debug, Clone)]
pub struct GeneratedVariant {
    /// The assembled document, ready to serialize.
    pub document: VariantDocument,
    /// Diagnostics for logging and audit.
    pub metadata: GenerationMetadata,
}
