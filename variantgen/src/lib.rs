//! # variantgen
//!
//! Resilient generation of SEO variant pages from large-language-model
//! output.
//!
//! variantgen takes a keyword ("pixel art maker"), prompts a completion
//! backend with a source tool's SEO content as structural reference,
//! then recovers a schema-shaped JSON document from whatever the model
//! actually returns: prose-wrapped, fenced, quote-escaped, trailing-comma
//! riddled, or truncated mid-object. Recovered documents are validated
//! (warn-only), optionally improved by a reflection round, and assembled
//! into a complete variant page document with config, placeholder copy,
//! default style, and a randomized page structure whose FAQ/CTA tail is
//! fixed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use variantgen::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = SourceDocument::from_tool_json(&load_tool_json()?);
//!     let variant =
//!         variantgen::quick::generate_variant("pixel art maker", "playground", &source).await?;
//!     std::fs::write(
//!         variant.document.file_name(),
//!         serde_json::to_string_pretty(&variant.document)?,
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! variantgen is organized as a workspace of focused crates:
//!
//! - [`variantgen_core`] - Document model, topics, page structure, cache
//! - [`variantgen_output`] - Extraction, repair, and validation of model output
//! - [`variantgen_backends`] - Completion backends and the mock backend
//! - [`variantgen_pipeline`] - Prompts, orchestration, strategies, batching

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod quick;

/// Document model, topics, page structure, and the source cache.
pub use variantgen_core as core;

/// Extraction, repair, and validation of model output.
pub use variantgen_output as output;

/// Completion backends.
pub use variantgen_backends as backends;

/// Prompts, orchestration, strategies, and batching.
pub use variantgen_pipeline as pipeline;

/// Prelude for common imports.
pub mod prelude {
    pub use variantgen_backends::prelude::*;
    pub use variantgen_core::prelude::*;
    pub use variantgen_output::{extract, repair, validate, RepairTrace, ValidationReport};
    pub use variantgen_pipeline::prelude::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_prelude_is_coherent() {
        // The prelude must cover the one-stop flow: topic in, repaired
        // document out.
        let topic = Topic::parse("pixel art maker");
        assert_eq!(topic.primary, "pixel art maker");

        let (fixed, trace) = crate::output::repair(r#"{"a": 1,}"#);
        assert_eq!(fixed, r#"{"a": 1}"#);
        assert!(!trace.is_empty());
    }

    #[tokio::test]
    async fn test_quick_fails_cleanly_without_configuration() {
        // No VARIANTGEN_API_BASE_URL in the test environment.
        let source = SourceDocument::default();
        let result = crate::quick::generate_variant("x", "playground", &source).await;
        assert!(matches!(result, Err(PipelineError::BackendUnavailable(_))));
    }
}
