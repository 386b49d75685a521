//! Completion request and response types.

use serde::{Deserialize, Serialize};

/// Default cap on generated tokens per completion.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 150;

/// A sampled text-completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub num_return_sequences: u32,
    pub temperature: f32,
    pub max_new_tokens: u32,
    pub do_sample: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            num_return_sequences: 1,
            temperature: 0.7,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            do_sample: true,
        }
    }

    pub fn with_sequences(mut self, n: u32) -> Self {
        self.num_return_sequences = n.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Temperature as sent on the wire. Sampling backends reject zero, so it
    /// is floored at a small positive value.
    pub fn effective_temperature(&self) -> f32 {
        self.temperature.max(0.01)
    }
}

/// Completions returned by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub completions: Vec<String>,
    pub model: String,
    pub provider: String,
    pub latency_ms: u64,
}
