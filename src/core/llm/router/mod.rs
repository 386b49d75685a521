//! LLM Provider Router
//!
//! Shared error type, completion types and the `LLMProvider` trait.

mod error;
mod provider;
mod types;

pub use error::{LLMError, Result};
pub use provider::LLMProvider;
pub use types::{CompletionRequest, CompletionResponse, DEFAULT_MAX_NEW_TOKENS};
