//! One-call generation without wiring a registry by hand.
//!
//! Backends are configured from the environment:
//!
//! - `VARIANTGEN_API_BASE_URL` / `VARIANTGEN_SESSION_TOKEN` for the
//!   completion API (required)
//! - `PERPLEXITY_API_KEY` for the research backend (optional; when
//!   present, research is registered behind the direct strategy)

use std::sync::Arc;
use variantgen_backends::{CompletionApiBackend, ResearchBackend};
use variantgen_core::{SourceDocument, Topic};
use variantgen_pipeline::{
    DirectStrategy, GeneratedVariant, GeneratorStrategy, PipelineError, ResearchStrategy,
    StrategyRegistry,
};

/// Build the default strategy registry from environment configuration.
///
/// The direct strategy is always registered first; the research
/// strategy joins only when its API key is configured.
pub fn default_registry() -> Result<StrategyRegistry, PipelineError> {
    let completion = Arc::new(CompletionApiBackend::from_env()?);
    let direct = Arc::new(DirectStrategy::new(completion));

    let mut strategies: Vec<Arc<dyn GeneratorStrategy>> =
        vec![direct.clone() as Arc<dyn GeneratorStrategy>];
    if let Ok(research) = ResearchBackend::from_env() {
        strategies.push(Arc::new(ResearchStrategy::new(Arc::new(research), direct)));
    } else {
        tracing::debug!("research backend not configured, direct strategy only");
    }

    Ok(StrategyRegistry::new(strategies))
}

/// Generate one variant for a pipe-separated keyword string.
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// use variantgen_core::SourceDocument;
///
/// let source = SourceDocument::from_tool_json(&serde_json::json!({
///     "seo": {"meta": {"title": "Playground"}},
///     "examples": []
/// }));
/// let variant =
///     variantgen::quick::generate_variant("pixel art maker|8-bit art", "playground", &source)
///         .await?;
/// println!("{}", variant.document.file_name());
/// # Ok(())
/// # }
/// ```
pub async fn generate_variant(
    keyword: &str,
    tool_type: &str,
    source: &SourceDocument,
) -> Result<GeneratedVariant, PipelineError> {
    let registry = default_registry()?;
    let strategy = registry.first_available()?;
    let topic = Topic::parse(keyword);
    strategy.generate(&topic, tool_type, source).await
}
