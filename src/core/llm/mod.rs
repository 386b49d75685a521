//! LLM Client Module
//!
//! Text-completion providers behind a single `LLMProvider` trait, and the
//! lazily-initialized model slot the generator draws its handle from.
//!
//! # Module Structure
//!
//! - `router`: `LLMProvider` trait, error and completion types
//! - `providers`: Individual provider implementations and `ProviderConfig`

pub mod providers;
pub mod router;

pub use providers::*;
pub use router::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Result, DEFAULT_MAX_NEW_TOKENS,
};

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Model Slot
// ============================================================================

/// Builds a provider on demand. May fail; failure is recorded, not fatal.
pub type ProviderFactory = Box<dyn Fn() -> Result<Arc<dyn LLMProvider>> + Send + Sync>;

/// Holds at most one model handle, created on first use.
///
/// Construction runs under the write lock, so concurrent callers never
/// build two handles. A failed construction leaves the slot empty and the
/// next caller tries again.
pub struct ModelSlot {
    factory: ProviderFactory,
    handle: RwLock<Option<Arc<dyn LLMProvider>>>,
    last_error: RwLock<Option<String>>,
    attempts: AtomicU32,
}

impl ModelSlot {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn LLMProvider>> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            handle: RwLock::new(None),
            last_error: RwLock::new(None),
            attempts: AtomicU32::new(0),
        }
    }

    /// Slot whose factory is the given provider configuration.
    pub fn from_config(config: ProviderConfig) -> Self {
        Self::new(move || config.create_provider())
    }

    /// Slot that already holds a handle.
    pub fn with_provider(provider: Arc<dyn LLMProvider>) -> Self {
        let slot = Self::new(|| {
            Err(LLMError::NotConfigured(
                "slot was created with a fixed provider".to_string(),
            ))
        });
        Self {
            handle: RwLock::new(Some(provider)),
            ..slot
        }
    }

    /// Slot that never produces a handle.
    pub fn disabled() -> Self {
        Self::from_config(ProviderConfig::Disabled)
    }

    /// Return the handle, constructing it if the slot is empty.
    pub async fn ensure(&self) -> Result<Arc<dyn LLMProvider>> {
        if let Some(provider) = self.handle.read().await.as_ref() {
            return Ok(Arc::clone(provider));
        }

        let mut handle_guard = self.handle.write().await;
        if let Some(provider) = handle_guard.as_ref() {
            return Ok(Arc::clone(provider));
        }

        self.attempts.fetch_add(1, Ordering::Relaxed);
        match (self.factory)() {
            Ok(provider) => {
                log::info!(
                    "Model handle ready: {} ({})",
                    provider.name(),
                    provider.model()
                );
                *handle_guard = Some(Arc::clone(&provider));
                *self.last_error.write().await = None;
                Ok(provider)
            }
            Err(e) => {
                match &e {
                    LLMError::NotConfigured(_) => log::debug!("Model unavailable: {e}"),
                    _ => log::warn!("Failed to initialize model: {e}"),
                }
                *self.last_error.write().await = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The handle, if one has been constructed.
    pub async fn current(&self) -> Option<Arc<dyn LLMProvider>> {
        self.handle.read().await.clone()
    }

    /// Error from the most recent failed construction.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Number of times the factory has run.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSlot")
            .field("attempts", &self.attempts())
            .finish_non_exhaustive()
    }
}
