//! End-to-end pipeline tests over the mock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use variantgen_backends::{BackendError, MockBackend};
use variantgen_core::{validate_structure, SectionKey, SourceDocument, Topic};
use variantgen_pipeline::{
    run_batch, DirectStrategy, GenerationPipeline, GeneratorStrategy, PipelineError,
    ReflectionStatus, ResearchStrategy, StrategyKind,
};

fn complete_seo(title: &str) -> Value {
    let mut faq = serde_json::Map::new();
    faq.insert("title".into(), json!("Pixel Art Maker FAQ"));
    faq.insert("description".into(), json!("Answers to common questions."));
    for n in 1..=9 {
        faq.insert(format!("q{n}"), json!(format!("Question {n}?")));
        faq.insert(format!("a{n}"), json!(format!("Answer {n}.")));
    }
    json!({
        "meta": {"title": title, "description": "Make pixel art with AI.", "keywords": "pixel art, 8-bit"},
        "hero": {"title": title, "subtitle": "Turn photos into pixel art"},
        "whatIs": {"title": format!("What is {title}?"), "description": "An AI pixel art tool."},
        "examples": {"title": format!("{title} Examples"), "description": "See what it makes."},
        "howToUse": {"title": format!("How to Use The {title}"), "steps": [
            {"title": "Upload", "content": "Upload a photo."},
            {"title": "Generate", "content": "Let the AI work."}
        ]},
        "benefits": {"title": format!("Why Use The {title}"), "features": [
            {"title": "Fast", "content": "Results in seconds.", "icon": "⚡"}
        ]},
        "faq": faq,
        "cta": {"title": "Transform for FREE Today!", "description": "Start creating pixel art now.", "buttonText": "Try It Free"}
    })
}

fn source() -> SourceDocument {
    SourceDocument {
        seo: complete_seo("Playground"),
        examples: vec![json!({"image": "demo.png"})],
    }
}

fn topic() -> Topic {
    Topic::parse("Pixel Art Maker")
}

fn pinned_structure() -> Vec<SectionKey> {
    vec![
        SectionKey::WhatIs,
        SectionKey::Examples,
        SectionKey::HowToUse,
        SectionKey::Benefits,
        SectionKey::Faq,
        SectionKey::Cta,
    ]
}

#[tokio::test]
async fn pipeline_recovers_noisy_completion() {
    let pretty = serde_json::to_string_pretty(&complete_seo("Pixel Art Maker")).unwrap();
    // Inject a trailing comma before the closing brace so repair has to run.
    let with_trailing_comma = format!("{},\n}}", pretty[..pretty.len() - 1].trim_end());
    let noisy = format!(
        "Sure, here is the content:\n```json\n{with_trailing_comma}\n```\nLet me know!"
    );
    let backend = MockBackend::new("mock").with_response(noisy);

    let pipeline = GenerationPipeline::new(Arc::new(backend.clone()))
        .with_reflection(false)
        .with_page_structure(pinned_structure());
    let variant = pipeline.run(&topic(), "playground", &source()).await.unwrap();

    let meta = variant.document.seo.meta.as_ref().unwrap();
    assert_eq!(meta.title.as_deref(), Some("Pixel Art Maker"));
    assert_eq!(variant.metadata.backend, "mock");
    assert_eq!(variant.metadata.reflection, ReflectionStatus::Disabled);
    assert!(variant.metadata.warnings.is_empty());
    assert!(variant.metadata.timings.contains_key("prompting"));
    assert!(variant.metadata.timings.contains_key("awaiting-backend"));
    assert!(variant.metadata.timings.contains_key("extracting"));
    assert!(variant.metadata.timings.contains_key("repairing"));
    assert!(variant.metadata.timings.contains_key("validating"));

    // Examples carry over from the source document.
    assert_eq!(variant.document.examples, vec![json!({"image": "demo.png"})]);
    assert_eq!(variant.document.original_keyword, "Pixel Art Maker");

    let prompts = backend.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("'Pixel Art Maker'"));
}

#[tokio::test]
async fn reflection_improvement_is_applied() {
    let backend = MockBackend::new("mock")
        .with_response(complete_seo("Pixel Art Maker").to_string())
        .with_response(format!(
            "ISSUES FOUND:\n- generic copy\n\nIMPROVED CONTENT:\n```json\n{}\n```",
            complete_seo("Improved Pixel Art Maker")
        ));

    let pipeline = GenerationPipeline::new(Arc::new(backend.clone()))
        .with_page_structure(pinned_structure());
    let variant = pipeline.run(&topic(), "playground", &source()).await.unwrap();

    assert_eq!(variant.metadata.reflection, ReflectionStatus::Improved);
    let meta = variant.document.seo.meta.as_ref().unwrap();
    assert_eq!(meta.title.as_deref(), Some("Improved Pixel Art Maker"));

    let prompts = backend.recorded_prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("quality assurance expert"));
    assert!(variant.metadata.timings.contains_key("reflecting"));
}

#[tokio::test]
async fn accepted_reflection_output_is_revalidated() {
    // The first completion is complete; the reflection reply keeps only a
    // titled meta section. The shipped warnings must describe the reply,
    // not the discarded pre-reflection candidate.
    let backend = MockBackend::new("mock")
        .with_response(complete_seo("Pixel Art Maker").to_string())
        .with_response(
            json!({"meta": {"title": "Improved Title"}}).to_string(),
        );

    let pipeline = GenerationPipeline::new(Arc::new(backend))
        .with_page_structure(pinned_structure());
    let variant = pipeline.run(&topic(), "playground", &source()).await.unwrap();

    assert_eq!(variant.metadata.reflection, ReflectionStatus::Improved);
    assert!(variant.document.seo.benefits.is_none());
    assert!(variant.document.seo.faq.is_none());
    assert!(
        !variant.metadata.warnings.is_empty(),
        "gutted reflection output must carry structure warnings"
    );
}

#[tokio::test]
async fn failed_reflection_keeps_document_unchanged() {
    let initial = complete_seo("Pixel Art Maker");

    let reflecting = MockBackend::new("mock")
        .with_response(initial.to_string())
        .with_response("I had trouble reviewing this content, sorry.");
    let plain = MockBackend::new("mock").with_response(initial.to_string());

    let with_reflection = GenerationPipeline::new(Arc::new(reflecting))
        .with_page_structure(pinned_structure());
    let without_reflection = GenerationPipeline::new(Arc::new(plain))
        .with_reflection(false)
        .with_page_structure(pinned_structure());

    let reflected = with_reflection.run(&topic(), "playground", &source()).await.unwrap();
    let baseline = without_reflection.run(&topic(), "playground", &source()).await.unwrap();

    assert!(matches!(
        reflected.metadata.reflection,
        ReflectionStatus::Skipped { .. }
    ));
    // The pre-reflection document survives exactly.
    assert_eq!(
        serde_json::to_string(&reflected.document.seo).unwrap(),
        serde_json::to_string(&baseline.document.seo).unwrap()
    );
}

#[tokio::test]
async fn backend_failure_is_backend_unavailable() {
    let backend = MockBackend::new("mock").with_error(BackendError::http(503, "overloaded"));
    let pipeline = GenerationPipeline::new(Arc::new(backend)).with_reflection(false);

    let err = pipeline.run(&topic(), "playground", &source()).await.unwrap_err();
    assert!(matches!(err, PipelineError::BackendUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unconfigured_backend_fails_before_prompting() {
    let backend = MockBackend::new("mock").unavailable();
    let pipeline = GenerationPipeline::new(Arc::new(backend.clone()));

    let err = pipeline.run(&topic(), "playground", &source()).await.unwrap_err();
    assert!(matches!(err, PipelineError::BackendUnavailable(_)));
    assert!(backend.recorded_prompts().is_empty());
}

#[tokio::test]
async fn word_salad_is_unparsable_with_diagnostics() {
    let backend = MockBackend::new("mock").with_response("I am unable to produce JSON today.");
    let pipeline = GenerationPipeline::new(Arc::new(backend)).with_reflection(false);

    let err = pipeline.run(&topic(), "playground", &source()).await.unwrap_err();
    match err {
        PipelineError::UnparsableOutput { raw, trace } => {
            assert_eq!(raw, "I am unable to produce JSON today.");
            assert!(trace.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn validation_warnings_attach_without_blocking() {
    let mut incomplete = complete_seo("Pixel Art Maker");
    incomplete.as_object_mut().unwrap().remove("benefits");

    let backend = MockBackend::new("mock").with_response(incomplete.to_string());
    let pipeline = GenerationPipeline::new(Arc::new(backend))
        .with_reflection(false)
        .with_page_structure(pinned_structure());

    let variant = pipeline.run(&topic(), "playground", &source()).await.unwrap();
    assert_eq!(variant.metadata.warnings.len(), 1);
    assert!(variant.document.seo.benefits.is_none());
}

#[tokio::test]
async fn random_page_structure_keeps_tail_invariant() {
    for _ in 0..20 {
        let backend =
            MockBackend::new("mock").with_response(complete_seo("Pixel Art Maker").to_string());
        let pipeline = GenerationPipeline::new(Arc::new(backend)).with_reflection(false);
        let variant = pipeline.run(&topic(), "playground", &source()).await.unwrap();

        let structure = &variant.document.page_structure;
        assert_eq!(structure.len(), 6);
        assert_eq!(&structure[4..], &[SectionKey::Faq, SectionKey::Cta]);
        assert!(validate_structure(structure).is_empty());
    }
}

#[tokio::test]
async fn research_strategy_uses_research_output_when_complete() {
    let research = MockBackend::new("research-mock").with_response(
        json!({"seo": complete_seo("Pixel Art Maker"), "examples": []}).to_string(),
    );
    let direct_backend = MockBackend::new("direct-mock");
    let fallback = Arc::new(
        DirectStrategy::new(Arc::new(direct_backend.clone())).with_reflection(false),
    );
    let strategy = ResearchStrategy::new(Arc::new(research.clone()), fallback)
        .with_page_structure(pinned_structure());

    assert_eq!(strategy.kind(), StrategyKind::Research);
    let variant = strategy.generate(&topic(), "playground", &source()).await.unwrap();

    assert_eq!(variant.metadata.backend, "research-mock");
    assert!(direct_backend.recorded_prompts().is_empty());
    assert!(research.recorded_prompts()[0].contains("2 steps"));
}

#[tokio::test]
async fn research_strategy_delegates_on_empty_content() {
    let research = MockBackend::new("research-mock").with_response(json!({"seo": {}}).to_string());
    let direct_backend = MockBackend::new("direct-mock")
        .with_response(complete_seo("Pixel Art Maker").to_string());
    let fallback = Arc::new(
        DirectStrategy::new(Arc::new(direct_backend.clone()))
            .with_reflection(false)
            .with_page_structure(pinned_structure()),
    );
    let strategy = ResearchStrategy::new(Arc::new(research.clone()), fallback);

    let variant = strategy.generate(&topic(), "playground", &source()).await.unwrap();

    assert_eq!(variant.metadata.backend, "direct-mock");
    assert_eq!(research.recorded_prompts().len(), 1);
    assert_eq!(direct_backend.recorded_prompts().len(), 1);
}

#[tokio::test]
async fn research_strategy_delegates_when_unconfigured() {
    let research = MockBackend::new("research-mock").unavailable();
    let direct_backend = MockBackend::new("direct-mock")
        .with_response(complete_seo("Pixel Art Maker").to_string());
    let fallback = Arc::new(
        DirectStrategy::new(Arc::new(direct_backend.clone()))
            .with_reflection(false)
            .with_page_structure(pinned_structure()),
    );
    let strategy = ResearchStrategy::new(Arc::new(research.clone()), fallback);

    assert!(strategy.is_available());
    let variant = strategy.generate(&topic(), "playground", &source()).await.unwrap();

    assert_eq!(variant.metadata.backend, "direct-mock");
    assert!(research.recorded_prompts().is_empty());
}

#[tokio::test]
async fn batch_collects_outcomes_in_order() {
    let backend = MockBackend::new("mock")
        .with_response(complete_seo("Pixel Art Maker").to_string())
        .with_response("garbage output with no json")
        .with_response(complete_seo("Anime Avatar Maker").to_string());
    let strategy = DirectStrategy::new(Arc::new(backend))
        .with_reflection(false)
        .with_page_structure(pinned_structure());

    let topics = vec![
        Topic::parse("Pixel Art Maker"),
        Topic::parse("Claymation Maker"),
        Topic::parse("Anime Avatar Maker"),
    ];
    let outcomes = run_batch(&topics, "playground", &strategy, &source(), Duration::ZERO).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].topic.primary, "Pixel Art Maker");
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(PipelineError::UnparsableOutput { .. })
    ));
    assert!(outcomes[2].result.is_ok());
}
