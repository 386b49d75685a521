//! LLM Provider Unit Tests
//!
//! Uses wiremock for HTTP mocking to test:
//! - Request formatting
//! - Response parsing (success and error cases)
//! - Status code mapping (auth, rate limit, model loading)
//! - Health checks

mod huggingface_tests;
mod ollama_tests;
