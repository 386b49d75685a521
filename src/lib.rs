/// Gallows - Dark Comedy Joke Generator
///
/// Core library providing style blending, prompt construction,
/// model-backed generation with template fallback, export and a REST API.

pub mod config;
pub mod core;
pub mod export;
pub mod server;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
