//! Ollama Provider Unit Tests
//!
//! Tests for the Ollama local provider including:
//! - One generate call per requested sequence
//! - Prompt echoed ahead of the response
//! - Error handling
//! - Host configuration

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::llm::providers::{OllamaProvider, OLLAMA_LOCALHOST};
use crate::core::llm::router::{CompletionRequest, LLMError, LLMProvider};

fn provider_for(server: &MockServer) -> OllamaProvider {
    OllamaProvider::new(server.uri(), "llama3.2".to_string(), Duration::from_secs(5)).unwrap()
}

// =============================================================================
// Provider Identity Tests
// =============================================================================

#[test]
fn test_provider_identity() {
    let provider = OllamaProvider::localhost("llama3.2".to_string()).unwrap();
    assert_eq!(provider.id(), "ollama");
    assert_eq!(provider.name(), "Ollama");
    assert_eq!(provider.model(), "llama3.2");
    assert_eq!(provider.host(), OLLAMA_LOCALHOST);
}

#[test]
fn test_host_trailing_slash_trimmed() {
    let provider = OllamaProvider::new(
        "http://192.168.1.100:11434/".to_string(),
        "llama3.2".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();
    assert_eq!(provider.host(), "http://192.168.1.100:11434");
}

// =============================================================================
// Completion Tests
// =============================================================================

#[tokio::test]
async fn test_one_call_per_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({ "model": "llama3.2", "stream": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "A joke.",
            "done": true
        })))
        .expect(3)
        .mount(&server)
        .await;

    let request = CompletionRequest::new("Prompt:\n").with_sequences(3);
    let response = provider_for(&server).complete(request).await.unwrap();

    assert_eq!(response.completions.len(), 3);
    assert!(response.completions.iter().all(|c| c == "Prompt:\nA joke."));
    assert_eq!(response.provider, "ollama");
}

#[tokio::test]
async fn test_missing_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(CompletionRequest::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_model_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(CompletionRequest::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::ApiError { status: 404, .. }));
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_uses_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&server)
        .await;

    assert!(provider_for(&server).health_check().await);
}

#[tokio::test]
async fn test_health_check_unreachable() {
    let provider = OllamaProvider::new(
        "http://127.0.0.1:9".to_string(),
        "llama3.2".to_string(),
        Duration::from_millis(200),
    )
    .unwrap();
    assert!(!provider.health_check().await);
}
