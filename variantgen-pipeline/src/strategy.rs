//! Generation strategies.
//!
//! A strategy owns the decision of which backend to prompt and how to
//! treat its output. [`DirectStrategy`] is the primary path through the
//! full [`GenerationPipeline`]; [`ResearchStrategy`] tries the research
//! backend first and hands the request to the primary path whenever the
//! research output is unusable.

use crate::error::PipelineError;
use crate::orchestrator::{recover_value, unwrap_seo, GenerationPipeline};
use crate::outcome::{GeneratedVariant, GenerationMetadata, ReflectionStatus};
use crate::prompt::research_prompt;
use crate::registry::StrategyKind;
use async_trait::async_trait;
use std::sync::Arc;
use variantgen_backends::CompletionBackend;
use variantgen_core::{random_structure, SectionKey, SeoContent, SourceDocument, Topic, VariantDocument};
use variantgen_output::validate;

/// A way of turning a topic into a generated variant.
#[async_trait]
pub trait GeneratorStrategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Whether the strategy's backend(s) are configured.
    fn is_available(&self) -> bool;

    /// Generate a variant for `topic`.
    async fn generate(
        &self,
        topic: &Topic,
        tool_type: &str,
        source: &SourceDocument,
    ) -> Result<GeneratedVariant, PipelineError>;
}

/// The primary strategy: the full pipeline over the completion backend.
pub struct DirectStrategy {
    pipeline: GenerationPipeline,
}

impl DirectStrategy {
    /// Create a direct strategy over `backend` with reflection on.
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            pipeline: GenerationPipeline::new(backend),
        }
    }

    /// Enable or disable the reflection round.
    #[must_use]
    pub fn with_reflection(mut self, enabled: bool) -> Self {
        self.pipeline = self.pipeline.with_reflection(enabled);
        self
    }

    /// Pin the page structure instead of randomizing per request.
    #[must_use]
    pub fn with_page_structure(mut self, structure: Vec<SectionKey>) -> Self {
        self.pipeline = self.pipeline.with_page_structure(structure);
        self
    }
}

#[async_trait]
impl GeneratorStrategy for DirectStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Direct
    }

    fn is_available(&self) -> bool {
        self.pipeline.backend().is_available()
    }

    async fn generate(
        &self,
        topic: &Topic,
        tool_type: &str,
        source: &SourceDocument,
    ) -> Result<GeneratedVariant, PipelineError> {
        self.pipeline.run(topic, tool_type, source).await
    }
}

/// The research strategy: content grounded in live search results.
///
/// Any unusable research outcome delegates to the primary strategy
/// instead of failing the request: a transport error, output with no
/// recoverable JSON, or a document missing its required content
/// (meta title/description, hero title, whatIs title/description).
pub struct ResearchStrategy {
    backend: Arc<dyn CompletionBackend>,
    fallback: Arc<DirectStrategy>,
    page_structure: Option<Vec<SectionKey>>,
}

impl ResearchStrategy {
    /// Create a research strategy delegating to `fallback`.
    pub fn new(backend: Arc<dyn CompletionBackend>, fallback: Arc<DirectStrategy>) -> Self {
        Self {
            backend,
            fallback,
            page_structure: None,
        }
    }

    /// Pin the page structure instead of randomizing per request.
    #[must_use]
    pub fn with_page_structure(mut self, structure: Vec<SectionKey>) -> Self {
        self.page_structure = Some(structure);
        self
    }

    async fn delegate(
        &self,
        reason: &str,
        topic: &Topic,
        tool_type: &str,
        source: &SourceDocument,
    ) -> Result<GeneratedVariant, PipelineError> {
        tracing::warn!(topic = %topic, reason, "research output unusable, delegating to direct strategy");
        self.fallback.generate(topic, tool_type, source).await
    }
}

#[async_trait]
impl GeneratorStrategy for ResearchStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Research
    }

    fn is_available(&self) -> bool {
        self.backend.is_available() || self.fallback.is_available()
    }

    async fn generate(
        &self,
        topic: &Topic,
        tool_type: &str,
        source: &SourceDocument,
    ) -> Result<GeneratedVariant, PipelineError> {
        if !self.backend.is_available() {
            return self
                .delegate("research backend not configured", topic, tool_type, source)
                .await;
        }

        let prompt = research_prompt(&source.seo, topic, tool_type);
        let completion = match self.backend.generate(&prompt).await {
            Ok(completion) => completion,
            Err(err) => {
                return self
                    .delegate(&format!("backend error: {err}"), topic, tool_type, source)
                    .await
            }
        };

        let seo_value = match recover_value(&completion.text) {
            Ok((value, _trace)) => unwrap_seo(value),
            Err(err) => {
                return self
                    .delegate(&err.to_string(), topic, tool_type, source)
                    .await
            }
        };

        let seo = SeoContent::from_value(&seo_value);
        if seo.is_empty() || !seo.has_required_fields() {
            return self
                .delegate("research content empty or incomplete", topic, tool_type, source)
                .await;
        }

        let report = validate(&seo_value);
        let structure = self
            .page_structure
            .clone()
            .unwrap_or_else(random_structure);
        let document =
            VariantDocument::assemble(seo, tool_type, topic, source.examples.clone(), structure);

        let mut metadata = GenerationMetadata::new(&completion.backend);
        metadata.reflection = ReflectionStatus::Disabled;
        metadata.warnings = report.warnings;

        tracing::info!(request_id = %metadata.request_id, topic = %topic, "research generation complete");
        Ok(GeneratedVariant { document, metadata })
    }
}
