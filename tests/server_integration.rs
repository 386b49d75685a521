//! Integration tests for the REST API.
//!
//! Requests are driven through the router in-process with
//! `tower::ServiceExt::oneshot`; no socket is bound.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use gallows::core::jokes::JokeGenerator;
use gallows::core::llm::ModelSlot;
use gallows::core::styles::StyleStore;
use gallows::server::router;

fn app() -> Router {
    let generator = JokeGenerator::new(
        Arc::new(StyleStore::builtin().unwrap()),
        ModelSlot::disabled(),
    )
    .with_seed(11);
    router(Arc::new(generator))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_generate(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_list_styles() {
    let request = Request::builder()
        .uri("/api/styles")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    let styles = body.as_object().unwrap();
    assert!(styles.contains_key("Default"));
    assert!(styles.contains_key("Gallows"));
    assert!(!styles["Sarcastic"]["jokes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_with_defaults() {
    let (status, body) = send(post_generate(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "life");
    assert_eq!(body["jokes"].as_array().unwrap().len(), 5);
    assert_eq!(body["style_blend"], json!({ "Default": 1.0 }));
    assert!(body["style_description"].as_str().unwrap().contains("100%"));
}

#[tokio::test]
async fn test_generate_blend() {
    let (status, body) = send(post_generate(json!({
        "topic": "office life",
        "style_weights": { "Sarcastic": 0.5, "Deadpan": 0.5 },
        "output_type": "One-liners",
        "madness": "0.7",
        "darkness": 5,
        "num_jokes": 3
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    let jokes = body["jokes"].as_array().unwrap();
    assert_eq!(jokes.len(), 3);
    assert!(jokes
        .iter()
        .all(|j| j.as_str().unwrap().contains("office life")));
    assert_eq!(
        body["style_description"],
        "Sarcastic (50%) blended with Deadpan (50%)"
    );
}

#[tokio::test]
async fn test_blank_topic_is_bad_request() {
    let (status, body) = send(post_generate(json!({ "topic": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a topic");
    assert_eq!(body["jokes"], json!([]));
}

#[tokio::test]
async fn test_out_of_range_count_is_bad_request() {
    let (status, body) = send(post_generate(json!({ "num_jokes": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("num_jokes"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["jokes"], json!([]));
}
