//! # variantgen-pipeline
//!
//! The generation orchestrator: prompts, the per-request pipeline,
//! strategies, and batch helpers.
//!
//! A request flows through [`GenerationPipeline`] stages: build the
//! prompt, await the backend, recover JSON from the completion via
//! `variantgen-output`, validate (warn-only), optionally reflect, and
//! assemble the final [`VariantDocument`](variantgen_core::VariantDocument)
//! with config, placeholder copy, default style and page structure.
//!
//! Strategy selection is typed: [`StrategyKind`] enumerates the known
//! strategies and [`StrategyRegistry`] is built once at startup.
//! [`ResearchStrategy`] silently delegates to [`DirectStrategy`] when
//! the research backend is unavailable or returns unusable content.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use variantgen_backends::CompletionApiBackend;
//! use variantgen_core::{SourceDocument, Topic};
//! use variantgen_pipeline::{DirectStrategy, GeneratorStrategy};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(CompletionApiBackend::from_env()?);
//! let strategy = DirectStrategy::new(backend);
//!
//! let topic = Topic::parse("pixel art maker|8-bit art generator");
//! let source = SourceDocument::default();
//! let variant = strategy.generate(&topic, "playground", &source).await?;
//! println!("{}", variant.document.file_name());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod batch;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod prompt;
pub mod registry;
pub mod strategy;

pub use batch::{run_batch, BatchOutcome};
pub use error::{PipelineError, PipelineResult};
pub use orchestrator::{GenerationPipeline, Stage};
pub use outcome::{GeneratedVariant, GenerationMetadata, ReflectionStatus};
pub use prompt::{generation_prompt, reflection_prompt, research_prompt};
pub use registry::{StrategyKind, StrategyRegistry};
pub use strategy::{DirectStrategy, GeneratorStrategy, ResearchStrategy};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        run_batch, DirectStrategy, GeneratedVariant, GenerationPipeline, GeneratorStrategy,
        PipelineError, ReflectionStatus, ResearchStrategy, StrategyKind, StrategyRegistry,
    };
}
