//! Joke generation: request types, prompt assembly, template fallback and
//! the orchestrator that ties them to a model.

pub mod errors;
pub mod fallback;
pub mod generator;
pub mod prompt;
pub mod types;

pub use errors::{GenerationError, ValidationError};
pub use fallback::FallbackSource;
pub use generator::{
    extract_joke, GenerationReport, GenerationResult, GeneratorSettings, JokeGenerator,
    ModelAttempt,
};
pub use prompt::build_prompt;
pub use types::{JokeRequest, OutputType, TransitionType, MAX_JOKES};
