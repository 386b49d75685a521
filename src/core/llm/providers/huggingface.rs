//! Hugging Face Provider Implementation
//!
//! Text generation through the Hugging Face Inference API.

use crate::core::llm::router::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Result,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_HF_MODEL: &str = "microsoft/DialoGPT-medium";

/// Hugging Face Inference API provider
pub struct HuggingFaceProvider {
    api_base: String,
    model: String,
    token: Option<String>,
    client: Client,
}

impl HuggingFaceProvider {
    pub fn new(model: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_base: HF_INFERENCE_URL.to_string(),
            model,
            token: token.filter(|t| !t.trim().is_empty()),
            client,
        })
    }

    /// Point the provider at a different inference endpoint (self-hosted
    /// text-generation-inference, or a mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.api_base, self.model)
    }

    fn build_body(request: &CompletionRequest) -> serde_json::Value {
        serde_json::json!({
            "inputs": request.prompt,
            "parameters": {
                "max_new_tokens": request.max_new_tokens,
                "temperature": request.effective_temperature(),
                "num_return_sequences": request.num_return_sequences,
                "do_sample": request.do_sample,
                "return_full_text": true
            },
            "options": {
                "wait_for_model": true
            }
        })
    }

    fn parse_completions(json: &serde_json::Value) -> Result<Vec<String>> {
        if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
            return Err(LLMError::InvalidResponse(error.to_string()));
        }

        let items = json
            .as_array()
            .ok_or_else(|| LLMError::InvalidResponse("Expected an array of generations".to_string()))?;

        let completions: Vec<String> = items
            .iter()
            .filter_map(|item| item["generated_text"].as_str())
            .map(str::to_string)
            .collect();

        if completions.is_empty() && !items.is_empty() {
            return Err(LLMError::InvalidResponse(
                "Missing generated_text in response".to_string(),
            ));
        }

        Ok(completions)
    }
}

#[async_trait]
impl LLMProvider for HuggingFaceProvider {
    fn id(&self) -> &str {
        "huggingface"
    }

    fn name(&self) -> &str {
        "Hugging Face"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> bool {
        let mut req = self.client.get(self.model_url());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        match req.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = Self::build_body(&request);

        let mut req = self.client.post(self.model_url()).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let start = std::time::Instant::now();
        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout
            } else {
                LLMError::HttpError(e)
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LLMError::from_status(status.as_u16(), text));
        }

        let json: serde_json::Value = resp.json().await?;
        let latency = start.elapsed().as_millis() as u64;
        let completions = Self::parse_completions(&json)?;

        log::debug!(
            "huggingface returned {} completions in {}ms",
            completions.len(),
            latency
        );

        Ok(CompletionResponse {
            completions,
            model: self.model.clone(),
            provider: "huggingface".to_string(),
            latency_ms: latency,
        })
    }
}
