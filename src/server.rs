//! REST API
//!
//! - `GET /api/styles`: the style catalogue
//! - `POST /api/generate`: generate a batch of jokes
//! - `GET /health`: liveness probe

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::core::jokes::{
    GenerationError, JokeGenerator, JokeRequest, OutputType, TransitionType, ValidationError,
};
use crate::core::styles::StyleWeights;

const DEFAULT_TOPIC: &str = "life";

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /api/generate`. Every field is optional.
///
/// Numeric fields accept JSON numbers or numeric strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateBody {
    pub style_weights: Option<StyleWeights>,
    pub topic: Option<String>,
    pub output_type: Option<String>,
    pub transition_type: Option<String>,
    pub madness: Option<Value>,
    pub darkness: Option<Value>,
    pub num_jokes: Option<Value>,
}

fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl GenerateBody {
    /// Convert into a generator request, applying the endpoint defaults.
    pub fn into_request(self) -> Result<JokeRequest, ValidationError> {
        let mut request = JokeRequest::new(self.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string()));

        if let Some(weights) = self.style_weights {
            request = request.with_weights(weights);
        }
        if let Some(output_type) = self.output_type {
            request = request.with_output_type(OutputType::from_str(&output_type));
        }
        if let Some(transition) = self.transition_type {
            request = request.with_transition(TransitionType::from_str(&transition));
        }

        if let Some(value) = self.madness {
            let madness = lenient_number(&value)
                .ok_or(ValidationError::InvalidMadness { value: f32::NAN })?;
            request = request.with_madness(madness as f32);
        }

        if let Some(value) = self.darkness {
            let darkness = lenient_number(&value)
                .ok_or(ValidationError::InvalidDarkness { value: -1 })?
                .trunc() as i64;
            let darkness = u8::try_from(darkness)
                .map_err(|_| ValidationError::InvalidDarkness { value: darkness })?;
            request = request.with_darkness(darkness);
        }

        if let Some(value) = self.num_jokes {
            let requested = lenient_number(&value)
                .ok_or(ValidationError::InvalidJokeCount {
                    requested: 0,
                    max: crate::core::jokes::MAX_JOKES,
                })?
                .trunc() as i64;
            let num_jokes = usize::try_from(requested).map_err(|_| {
                ValidationError::InvalidJokeCount {
                    requested,
                    max: crate::core::jokes::MAX_JOKES,
                }
            })?;
            request = request.with_num_jokes(num_jokes);
        }

        Ok(request)
    }
}

// ============================================================================
// Router
// ============================================================================

/// Build the API router around a shared generator.
pub fn router(generator: Arc<JokeGenerator>) -> Router {
    Router::new()
        .route("/api/styles", get(list_styles))
        .route("/api/generate", post(generate))
        .route("/health", get(health_check))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(generator)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(generator: Arc<JokeGenerator>, config: &ServerConfig) -> std::io::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Joke API listening on http://{}", addr);

    axum::serve(listener, router(generator))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
            log::info!("Joke API shutting down");
        })
        .await
}

// ============================================================================
// HTTP Handlers
// ============================================================================

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn list_styles(State(generator): State<Arc<JokeGenerator>>) -> impl IntoResponse {
    Json(generator.styles().to_raw())
}

async fn generate(
    State(generator): State<Arc<JokeGenerator>>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let request = match body.into_request() {
        Ok(request) => request,
        Err(e) => return generation_error_response(e.into()),
    };

    match generator.generate_jokes(&request).await {
        Ok(result) => Json(serde_json::json!({
            "jokes": result.jokes,
            "style_blend": request.style_weights,
            "style_description": result.style_description,
            "topic": request.topic,
        }))
        .into_response(),
        Err(e) => generation_error_response(e),
    }
}

fn generation_error_response(error: GenerationError) -> Response {
    let status = match &error {
        GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    error_response(status, error.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message,
            "jokes": []
        })),
    )
        .into_response()
}
