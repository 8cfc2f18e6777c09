//! Integration tests for the HTTP backends against a local mock server.

use std::time::Duration;
use variantgen_backends::{BackendError, CompletionApiBackend, CompletionBackend, ResearchBackend};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn completion_api_posts_prompt_and_returns_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generateText"))
        .and(header("Cookie", "next-auth.session-token=secret"))
        .and(body_json(serde_json::json!({
            "prompt": "write the SEO json",
            "noNeedLogin": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"meta\": {\"title\": \"X\"}}"))
        .expect(1)
        .mount(&server)
        .await;

    let backend = CompletionApiBackend::new(server.uri()).with_session_token("secret");
    let completion = backend.generate("write the SEO json").await.unwrap();

    assert_eq!(completion.text, "{\"meta\": {\"title\": \"X\"}}");
    assert_eq!(completion.backend, "completion-api");
}

#[tokio::test]
async fn completion_api_maps_auth_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generateText"))
        .respond_with(ResponseTemplate::new(401).set_body_string("session expired"))
        .mount(&server)
        .await;

    let backend = CompletionApiBackend::new(server.uri());
    let err = backend.generate("prompt").await.unwrap_err();

    assert!(matches!(err, BackendError::Authentication(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn completion_api_maps_server_errors_as_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generateText"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let backend = CompletionApiBackend::new(server.uri());
    let err = backend.generate("prompt").await.unwrap_err();

    assert!(matches!(err, BackendError::Http { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn research_backend_sends_pinned_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer pplx-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "sonar",
            "max_tokens": 2000,
            "temperature": 0.2,
            "top_p": 0.9,
            "frequency_penalty": 1.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "researched copy"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ResearchBackend::new("pplx-key").with_base_url(server.uri());
    let completion = backend.generate("research this keyword").await.unwrap();

    assert_eq!(completion.text, "researched copy");
    assert_eq!(completion.backend, "perplexity-research");
}

#[tokio::test]
async fn research_backend_honors_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_string("slow down"),
        )
        .mount(&server)
        .await;

    let backend = ResearchBackend::new("pplx-key").with_base_url(server.uri());
    let err = backend.generate("prompt").await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
}

#[tokio::test]
async fn research_backend_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let backend = ResearchBackend::new("pplx-key").with_base_url(server.uri());
    let err = backend.generate("prompt").await.unwrap_err();

    assert!(matches!(err, BackendError::InvalidResponse(_)));
}
