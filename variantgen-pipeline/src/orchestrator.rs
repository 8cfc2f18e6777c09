//! The per-request generation pipeline.
//!
//! One [`GenerationPipeline`] run takes a topic from prompt to
//! assembled [`VariantDocument`]: build the prompt, await the backend,
//! recover a JSON document from the completion, validate it, and
//! optionally run one reflection round. A request runs to completion
//! or fails; there is no cancellation and no internal retry.

use crate::error::PipelineError;
use crate::outcome::{GeneratedVariant, GenerationMetadata, ReflectionStatus};
use crate::prompt::{generation_prompt, reflection_prompt};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use variantgen_backends::{BackendError, CompletionBackend};
use variantgen_core::{random_structure, SectionKey, SeoContent, SourceDocument, Topic, VariantDocument};
use variantgen_output::{extract, repair, validate, RepairTrace};

/// Pipeline stages, in order. `Failed` absorbs from the fallible
/// stages; validation and reflection never fail a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the generation prompt.
    Prompting,
    /// Waiting on the backend completion.
    AwaitingBackend,
    /// Locating JSON in the completion.
    Extracting,
    /// Repairing a candidate that failed to parse.
    Repairing,
    /// Structural validation (warn-only).
    Validating,
    /// Optional reflection round.
    Reflecting,
    /// Request finished with a document.
    Done,
    /// Request ended in an error.
    Failed,
}

impl Stage {
    /// Stable name, used as a timing key and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Prompting => "prompting",
            Stage::AwaitingBackend => "awaiting-backend",
            Stage::Extracting => "extracting",
            Stage::Repairing => "repairing",
            Stage::Validating => "validating",
            Stage::Reflecting => "reflecting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unwrap a `{"seo": {...}}` envelope if the model returned one.
pub(crate) fn unwrap_seo(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(mut map) if map.get("seo").is_some_and(JsonValue::is_object) => {
            map.remove("seo").unwrap_or(JsonValue::Null)
        }
        other => other,
    }
}

/// Extract and repair `raw` into a parsed JSON value.
pub(crate) fn recover_value(raw: &str) -> Result<(JsonValue, RepairTrace), PipelineError> {
    let candidate = match extract(raw) {
        Ok(candidate) => candidate,
        Err(_) => {
            return Err(PipelineError::UnparsableOutput {
                raw: raw.to_string(),
                trace: RepairTrace::default(),
            })
        }
    };
    let (candidate, trace) = repair(&candidate);
    match serde_json::from_str(&candidate) {
        Ok(value) => Ok((value, trace)),
        Err(_) => Err(PipelineError::UnparsableOutput {
            raw: raw.to_string(),
            trace,
        }),
    }
}

/// Orchestrates one generation request against a single backend.
pub struct GenerationPipeline {
    backend: Arc<dyn CompletionBackend>,
    reflect: bool,
    page_structure: Option<Vec<SectionKey>>,
}

impl GenerationPipeline {
    /// Create a pipeline with reflection enabled.
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            reflect: true,
            page_structure: None,
        }
    }

    /// Enable or disable the reflection round.
    #[must_use]
    pub fn with_reflection(mut self, enabled: bool) -> Self {
        self.reflect = enabled;
        self
    }

    /// Pin the page structure instead of randomizing per request.
    #[must_use]
    pub fn with_page_structure(mut self, structure: Vec<SectionKey>) -> Self {
        self.page_structure = Some(structure);
        self
    }

    /// The backend this pipeline generates against.
    pub fn backend(&self) -> &Arc<dyn CompletionBackend> {
        &self.backend
    }

    /// Run one request to `Done` or `Failed`.
    pub async fn run(
        &self,
        topic: &Topic,
        tool_type: &str,
        source: &SourceDocument,
    ) -> Result<GeneratedVariant, PipelineError> {
        if !self.backend.is_available() {
            return Err(BackendError::configuration(format!(
                "backend '{}' is not configured",
                self.backend.name()
            ))
            .into());
        }

        let mut timings: IndexMap<&'static str, Duration> = IndexMap::new();
        tracing::info!(topic = %topic, tool_type, backend = self.backend.name(), "starting generation");

        let clock = Instant::now();
        let prompt = generation_prompt(&source.seo, topic, tool_type);
        timings.insert(Stage::Prompting.as_str(), clock.elapsed());

        let clock = Instant::now();
        let completion = self.backend.generate(&prompt).await.map_err(|err| {
            tracing::warn!(stage = %Stage::Failed, error = %err, "backend call failed");
            PipelineError::BackendUnavailable(err)
        })?;
        timings.insert(Stage::AwaitingBackend.as_str(), clock.elapsed());

        let clock = Instant::now();
        let (value, trace) = recover_value(&completion.text).map_err(|err| {
            tracing::warn!(stage = %Stage::Failed, error = %err, "completion unrecoverable");
            err
        })?;
        timings.insert(Stage::Extracting.as_str(), clock.elapsed());
        if !trace.is_empty() {
            tracing::debug!(fixes = ?trace.applied(), "completion needed repair");
            timings.insert(Stage::Repairing.as_str(), Duration::ZERO);
        }

        let seo_value = unwrap_seo(value);

        let clock = Instant::now();
        let mut report = validate(&seo_value);
        timings.insert(Stage::Validating.as_str(), clock.elapsed());

        let mut reflection = ReflectionStatus::Disabled;
        let mut final_value = seo_value;
        if self.reflect {
            let clock = Instant::now();
            match self.reflect_on(&final_value, topic).await {
                Ok(improved) => {
                    final_value = improved;
                    reflection = ReflectionStatus::Improved;
                    // The warnings must describe the document that ships.
                    report = validate(&final_value);
                }
                Err(reason) => {
                    // The pre-reflection document is kept untouched.
                    tracing::warn!(%reason, "reflection skipped");
                    reflection = ReflectionStatus::Skipped { reason };
                }
            }
            timings.insert(Stage::Reflecting.as_str(), clock.elapsed());
        }

        let seo = SeoContent::from_value(&final_value);
        let structure = self
            .page_structure
            .clone()
            .unwrap_or_else(random_structure);
        let document =
            VariantDocument::assemble(seo, tool_type, topic, source.examples.clone(), structure);

        let mut metadata = GenerationMetadata::new(&completion.backend);
        metadata.reflection = reflection;
        metadata.warnings = report.warnings;
        metadata.timings = timings;

        tracing::info!(
            stage = %Stage::Done,
            request_id = %metadata.request_id,
            warnings = metadata.warnings.len(),
            "generation complete"
        );
        Ok(GeneratedVariant { document, metadata })
    }

    /// One reflection round. Failure is a skip reason, never an error.
    async fn reflect_on(&self, current: &JsonValue, topic: &Topic) -> Result<JsonValue, String> {
        let prompt = reflection_prompt(current, topic);
        let completion = self
            .backend
            .generate(&prompt)
            .await
            .map_err(|err| format!("backend error: {err}"))?;

        let (value, _trace) = recover_value(&completion.text)
            .map_err(|err| format!("reflection output unusable: {err}"))?;
        let value = unwrap_seo(value);

        match value.pointer("/meta/title").and_then(JsonValue::as_str) {
            Some(title) if !title.trim().is_empty() => Ok(value),
            _ => Err("reflection output missing meta.title".to_string()),
        }
    }
}
