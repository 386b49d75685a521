//! LLM Provider Trait
//!
//! Defines the trait that all text-completion providers must implement.

use async_trait::async_trait;

use super::error::Result;
use super::types::{CompletionRequest, CompletionResponse};

/// Trait that all LLM providers must implement
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the provider's unique identifier
    fn id(&self) -> &str;

    /// Get the provider's display name
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Check if the provider is healthy/available
    async fn health_check(&self) -> bool;

    /// Sample one or more completions for a prompt.
    ///
    /// Each returned completion is the full text: the prompt followed by the
    /// generated continuation.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
