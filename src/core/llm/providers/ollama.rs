//! Ollama Provider Implementation
//!
//! Local LLM provider using Ollama for running models locally.

use crate::core::llm::router::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Result,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const OLLAMA_LOCALHOST: &str = "http://localhost:11434";

/// Ollama provider for local LLM inference
pub struct OllamaProvider {
    host: String,
    model: String,
    client: Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    pub fn new(host: String, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            model,
            client,
        })
    }

    /// Create with default localhost
    pub fn localhost(model: String) -> Result<Self> {
        Self::new(OLLAMA_LOCALHOST.to_string(), model, Duration::from_secs(300))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Ollama's generate endpoint returns one sample per call.
    async fn generate_once(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.host);

        let body = serde_json::json!({
            "model": self.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "temperature": request.effective_temperature(),
                "num_predict": request.max_new_tokens
            }
        });

        let resp = self.client.post(&url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(LLMError::from_status(status, text));
        }

        let json: serde_json::Value = resp.json().await?;

        let response = json["response"]
            .as_str()
            .ok_or_else(|| LLMError::InvalidResponse("Missing response".to_string()))?;

        Ok(format!("{}{}", request.prompt, response))
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    fn id(&self) -> &str {
        "ollama"
    }

    fn name(&self) -> &str {
        "Ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.host);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let start = std::time::Instant::now();

        let mut completions = Vec::with_capacity(request.num_return_sequences as usize);
        for _ in 0..request.num_return_sequences {
            completions.push(self.generate_once(&request).await?);
        }

        Ok(CompletionResponse {
            completions,
            model: self.model.clone(),
            provider: "ollama".to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
