//! Error types for joke generation.
//!
//! Only request validation reaches the caller. Model failures are absorbed
//! by the generator and reported through the stage report instead.

use thiserror::Error;

/// A request that cannot be served as given.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please provide a topic")]
    EmptyTopic,

    #[error("num_jokes must be between 1 and {max}, got {requested}")]
    InvalidJokeCount { requested: i64, max: usize },

    #[error("madness must be a number between 0 and 1, got {value}")]
    InvalidMadness { value: f32 },

    #[error("darkness must be between 0 and 10, got {value}")]
    InvalidDarkness { value: i64 },
}

/// Errors surfaced by the generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GenerationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
