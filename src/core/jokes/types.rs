//! Request types for joke generation.

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use crate::core::styles::{StyleWeights, DEFAULT_STYLE_KEY};

/// Largest batch a single request may ask for.
pub const MAX_JOKES: usize = 100;

pub const DEFAULT_MADNESS: f32 = 0.7;
pub const DEFAULT_DARKNESS: u8 = 5;
pub const DEFAULT_NUM_JOKES: usize = 5;
pub const MAX_DARKNESS: u8 = 10;

// ============================================================================
// Output Type
// ============================================================================

/// Shape of the comedic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputType {
    Routines,
    OneLiners,
    Punchlines,
    #[default]
    RandomJokes,
}

impl OutputType {
    pub const ALL: [OutputType; 4] = [
        Self::Routines,
        Self::OneLiners,
        Self::Punchlines,
        Self::RandomJokes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routines => "Routines",
            Self::OneLiners => "One-liners",
            Self::Punchlines => "Punchlines",
            Self::RandomJokes => "Random Jokes",
        }
    }

    /// Parse from string. Anything unrecognized is treated as random jokes.
    pub fn from_str(s: &str) -> Self {
        match normalize(s).as_str() {
            "routines" | "routine" => Self::Routines,
            "oneliners" | "oneliner" => Self::OneLiners,
            "punchlines" | "punchline" => Self::Punchlines,
            _ => Self::RandomJokes,
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OutputType {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<OutputType> for String {
    fn from(t: OutputType) -> Self {
        t.as_str().to_string()
    }
}

// ============================================================================
// Transition Type
// ============================================================================

/// How the bits of a routine hand off to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransitionType {
    FalseSegue,
    #[default]
    Thematic,
    AbsurdThematic,
    SelfAware,
    Random,
    None,
}

impl TransitionType {
    pub const ALL: [TransitionType; 6] = [
        Self::FalseSegue,
        Self::Thematic,
        Self::AbsurdThematic,
        Self::SelfAware,
        Self::Random,
        Self::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FalseSegue => "False Segue",
            Self::Thematic => "Thematic",
            Self::AbsurdThematic => "Absurd Thematic",
            Self::SelfAware => "Self-aware",
            Self::Random => "Random",
            Self::None => "None",
        }
    }

    /// Parse from string. Anything unrecognized means no explicit transitions.
    pub fn from_str(s: &str) -> Self {
        match normalize(s).as_str() {
            "falsesegue" => Self::FalseSegue,
            "thematic" => Self::Thematic,
            "absurdthematic" => Self::AbsurdThematic,
            "selfaware" => Self::SelfAware,
            "random" => Self::Random,
            _ => Self::None,
        }
    }
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TransitionType {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<TransitionType> for String {
    fn from(t: TransitionType) -> Self {
        t.as_str().to_string()
    }
}

/// Lower-case and drop separators so "One-liners", "one liners" and
/// "one_liners" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Request
// ============================================================================

/// Everything needed to produce a batch of jokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JokeRequest {
    pub topic: String,
    pub style_weights: StyleWeights,
    pub output_type: OutputType,
    pub transition_type: TransitionType,
    /// Creativity, also used as sampling temperature. In `[0, 1]`.
    pub madness: f32,
    /// In `[0, 10]`.
    pub darkness: u8,
    pub num_jokes: usize,
}

impl JokeRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            style_weights: default_weights(),
            output_type: OutputType::default(),
            transition_type: TransitionType::default(),
            madness: DEFAULT_MADNESS,
            darkness: DEFAULT_DARKNESS,
            num_jokes: DEFAULT_NUM_JOKES,
        }
    }

    pub fn with_weights(mut self, weights: StyleWeights) -> Self {
        self.style_weights = weights;
        self
    }

    /// Use a single style at full weight.
    pub fn with_style(mut self, key: impl Into<String>) -> Self {
        let mut weights = StyleWeights::new();
        weights.insert(key.into(), 1.0);
        self.style_weights = weights;
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn with_transition(mut self, transition_type: TransitionType) -> Self {
        self.transition_type = transition_type;
        self
    }

    pub fn with_madness(mut self, madness: f32) -> Self {
        self.madness = madness;
        self
    }

    pub fn with_darkness(mut self, darkness: u8) -> Self {
        self.darkness = darkness;
        self
    }

    pub fn with_num_jokes(mut self, num_jokes: usize) -> Self {
        self.num_jokes = num_jokes;
        self
    }

    /// The topic with surrounding whitespace removed.
    pub fn topic(&self) -> &str {
        self.topic.trim()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic().is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        if self.num_jokes == 0 || self.num_jokes > MAX_JOKES {
            return Err(ValidationError::InvalidJokeCount {
                requested: self.num_jokes as i64,
                max: MAX_JOKES,
            });
        }
        if !self.madness.is_finite() || !(0.0..=1.0).contains(&self.madness) {
            return Err(ValidationError::InvalidMadness {
                value: self.madness,
            });
        }
        if self.darkness > MAX_DARKNESS {
            return Err(ValidationError::InvalidDarkness {
                value: i64::from(self.darkness),
            });
        }
        Ok(())
    }
}

/// `{"Default": 1.0}`
pub fn default_weights() -> StyleWeights {
    let mut weights = StyleWeights::new();
    weights.insert(DEFAULT_STYLE_KEY.to_string(), 1.0);
    weights
}
