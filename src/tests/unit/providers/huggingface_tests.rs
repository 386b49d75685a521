//! Hugging Face Provider Unit Tests
//!
//! Tests for the Inference API provider including:
//! - Request body and auth header
//! - Parsing of generated_text arrays
//! - Status code mapping
//! - Timeout handling

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::llm::providers::HuggingFaceProvider;
use crate::core::llm::router::{CompletionRequest, LLMError, LLMProvider};

fn provider_for(server: &MockServer, token: Option<&str>) -> HuggingFaceProvider {
    HuggingFaceProvider::new(
        "gpt2".to_string(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_api_base(server.uri())
}

fn request() -> CompletionRequest {
    CompletionRequest::new("Generate random jokes about 'cats'.")
        .with_sequences(2)
        .with_temperature(0.8)
}

// =============================================================================
// Provider Identity Tests
// =============================================================================

#[tokio::test]
async fn test_provider_identity() {
    let server = MockServer::start().await;
    let provider = provider_for(&server, None);
    assert_eq!(provider.id(), "huggingface");
    assert_eq!(provider.name(), "Hugging Face");
    assert_eq!(provider.model(), "gpt2");
}

// =============================================================================
// Completion Tests
// =============================================================================

#[tokio::test]
async fn test_complete_parses_generations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .and(body_partial_json(json!({
            "inputs": "Generate random jokes about 'cats'.",
            "parameters": { "num_return_sequences": 2, "return_full_text": true },
            "options": { "wait_for_model": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "generated_text": "first completion" },
            { "generated_text": "second completion" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, None);
    let response = provider.complete(request()).await.unwrap();

    assert_eq!(response.completions, vec!["first completion", "second completion"]);
    assert_eq!(response.provider, "huggingface");
    assert_eq!(response.model, "gpt2");
}

#[tokio::test]
async fn test_token_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .and(header("authorization", "Bearer hf_test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "ok" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("hf_test"));
    assert!(provider.complete(request()).await.is_ok());
}

#[tokio::test]
async fn test_error_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Model too busy" })),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server, None);
    let err = provider.complete(request()).await.unwrap_err();
    assert!(matches!(err, LLMError::InvalidResponse(m) if m.contains("busy")));
}

// =============================================================================
// Status Mapping Tests
// =============================================================================

async fn complete_with_status(status: u16) -> LLMError {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&server)
        .await;

    provider_for(&server, None)
        .complete(request())
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    assert!(matches!(complete_with_status(401).await, LLMError::AuthError(_)));
}

#[tokio::test]
async fn test_too_many_requests_maps_to_rate_limited() {
    assert!(matches!(
        complete_with_status(429).await,
        LLMError::RateLimited { .. }
    ));
}

#[tokio::test]
async fn test_unavailable_maps_to_model_loading() {
    assert!(matches!(complete_with_status(503).await, LLMError::ModelLoading(_)));
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    match complete_with_status(500).await {
        LLMError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "nope");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "generated_text": "late" }]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::new("gpt2".to_string(), None, Duration::from_millis(100))
        .unwrap()
        .with_api_base(server.uri());
    let err = provider.complete(request()).await.unwrap_err();
    assert!(matches!(err, LLMError::Timeout));
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models/gpt2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "loaded": true })))
        .mount(&server)
        .await;

    assert!(provider_for(&server, None).health_check().await);
}

#[tokio::test]
async fn test_health_check_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models/gpt2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!provider_for(&server, None).health_check().await);
}
