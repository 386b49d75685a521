//! LLM Provider Implementations
//!
//! Concrete implementations of the `LLMProvider` trait, plus the provider
//! metadata table and the `ProviderConfig` factory.
//!
//! Adding a new provider requires:
//! 1. A new enum variant in `ProviderConfig`
//! 2. A new entry in `PROVIDERS`
//! 3. The provider implementation file

mod huggingface;
mod ollama;

pub use huggingface::{HuggingFaceProvider, DEFAULT_HF_MODEL, HF_INFERENCE_URL};
pub use ollama::{OllamaProvider, OLLAMA_LOCALHOST};

use super::router::{LLMError, LLMProvider, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// ── Provider metadata ───────────────────────────────────────────────────────

/// Static metadata for a known provider.
#[derive(Clone, Debug)]
pub struct ProviderMeta {
    pub id: &'static str,
    pub display_name: &'static str,
    pub default_model: &'static str,
    pub default_base: &'static str,
    /// Whether an access token is used when present.
    pub accepts_token: bool,
}

/// Canonical table of all known providers.
pub const PROVIDERS: &[ProviderMeta] = &[
    ProviderMeta {
        id: "huggingface",
        display_name: "Hugging Face Inference",
        default_model: DEFAULT_HF_MODEL,
        default_base: HF_INFERENCE_URL,
        accepts_token: true,
    },
    ProviderMeta {
        id: "ollama",
        display_name: "Ollama (Local)",
        default_model: "llama3.2",
        default_base: OLLAMA_LOCALHOST,
        accepts_token: false,
    },
];

pub fn find_provider_meta(id: &str) -> Option<&'static ProviderMeta> {
    PROVIDERS.iter().find(|p| p.id == id)
}

// ── ProviderConfig ──────────────────────────────────────────────────────────

/// Configuration for creating providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderConfig {
    HuggingFace {
        model: String,
        api_base: String,
        token: Option<String>,
        timeout_secs: u64,
    },
    Ollama {
        host: String,
        model: String,
        timeout_secs: u64,
    },
    /// No model; generation always uses the template fallback.
    Disabled,
}

impl ProviderConfig {
    /// Build the provider, validating the model id and endpoint first.
    pub fn create_provider(&self) -> Result<Arc<dyn LLMProvider>> {
        match self {
            ProviderConfig::HuggingFace {
                model,
                api_base,
                token,
                timeout_secs,
            } => {
                validate_model(model)?;
                validate_base(api_base)?;
                let provider = HuggingFaceProvider::new(
                    model.clone(),
                    token.clone(),
                    Duration::from_secs(*timeout_secs),
                )?
                .with_api_base(api_base.clone());
                Ok(Arc::new(provider))
            }
            ProviderConfig::Ollama {
                host,
                model,
                timeout_secs,
            } => {
                validate_model(model)?;
                validate_base(host)?;
                let provider = OllamaProvider::new(
                    host.clone(),
                    model.clone(),
                    Duration::from_secs(*timeout_secs),
                )?;
                Ok(Arc::new(provider))
            }
            ProviderConfig::Disabled => Err(LLMError::NotConfigured(
                "model generation is disabled".to_string(),
            )),
        }
    }

    pub fn provider_id(&self) -> &'static str {
        match self {
            ProviderConfig::HuggingFace { .. } => "huggingface",
            ProviderConfig::Ollama { .. } => "ollama",
            ProviderConfig::Disabled => "disabled",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ProviderConfig::Disabled)
    }
}

fn validate_model(model: &str) -> Result<()> {
    if model.trim().is_empty() {
        return Err(LLMError::NotConfigured("model id is empty".to_string()));
    }
    Ok(())
}

fn validate_base(base: &str) -> Result<()> {
    let parsed = url::Url::parse(base)
        .map_err(|e| LLMError::NotConfigured(format!("invalid endpoint '{base}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(LLMError::NotConfigured(format!(
            "unsupported endpoint scheme '{other}'"
        ))),
    }
}
