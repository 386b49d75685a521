//! Generation Orchestrator
//!
//! Validates the request, blends the styles, tries the model once, then tops
//! up with template fallback until exactly `num_jokes` jokes exist.

use std::sync::{Arc, Mutex};

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;

use super::errors::Result;
use super::fallback::{fallback_joke, FallbackSource};
use super::prompt::{build_prompt, sample_excerpt, CLOSING_MARKER};
use super::types::JokeRequest;
use crate::config::AppConfig;
use crate::core::llm::{CompletionRequest, ModelSlot, DEFAULT_MAX_NEW_TOKENS};
use crate::core::styles::{blend, load_styles, BlendResult, BlendStatus, StyleStore};

/// Extracted candidates this short or shorter are discarded.
pub const MIN_JOKE_CHARS: usize = 10;

/// Upper bound on completions requested from the model per call.
pub const MAX_MODEL_SEQUENCES: usize = 3;

// ============================================================================
// Settings & Report Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    pub max_new_tokens: u32,
    pub max_model_sequences: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            max_model_sequences: MAX_MODEL_SEQUENCES,
        }
    }
}

/// Outcome of the model-backed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelAttempt {
    /// No handle could be obtained.
    Unavailable { reason: String },
    /// The model answered; `extracted` of `completions` yielded a joke.
    Completed {
        provider: String,
        model: String,
        completions: usize,
        extracted: usize,
    },
    /// The model call failed.
    Failed { reason: String },
}

impl ModelAttempt {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Per-stage summary of one generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub blend_status: BlendStatus,
    pub pool_size: usize,
    pub model: ModelAttempt,
    pub model_jokes: usize,
    pub fallback_from_examples: usize,
    pub fallback_from_templates: usize,
}

impl GenerationReport {
    pub fn fallback_jokes(&self) -> usize {
        self.fallback_from_examples + self.fallback_from_templates
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    /// Exactly `num_jokes` entries.
    pub jokes: Vec<String>,
    pub style_description: String,
    pub report: GenerationReport,
}

// ============================================================================
// Extraction
// ============================================================================

/// Pull the joke out of a full-text completion.
///
/// The joke is whatever follows the line holding the closing instruction.
/// Returns `None` when the marker is missing or the remainder is too short.
pub fn extract_joke(raw: &str) -> Option<String> {
    let start = raw.find(CLOSING_MARKER)?;
    let (_, after) = raw[start..].split_once('\n')?;
    let candidate = after.trim();
    if candidate.chars().count() > MIN_JOKE_CHARS {
        Some(candidate.to_string())
    } else {
        None
    }
}

// ============================================================================
// Generator
// ============================================================================

pub struct JokeGenerator {
    styles: Arc<StyleStore>,
    model: ModelSlot,
    rng: Mutex<StdRng>,
    settings: GeneratorSettings,
}

impl JokeGenerator {
    pub fn new(styles: Arc<StyleStore>, model: ModelSlot) -> Self {
        Self {
            styles,
            model,
            rng: Mutex::new(StdRng::from_entropy()),
            settings: GeneratorSettings::default(),
        }
    }

    /// Build from application config: styles from the configured file (or
    /// the bundled set) and a model slot for the configured provider.
    pub fn from_config(config: &AppConfig) -> Self {
        let styles = Arc::new(load_styles(config.styles.path.as_deref()));
        let model = ModelSlot::from_config(config.model.provider_config());
        Self::new(styles, model).with_settings(GeneratorSettings {
            max_new_tokens: config.model.max_new_tokens,
            ..GeneratorSettings::default()
        })
    }

    /// Fix the random seed for reproducible sampling.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn styles(&self) -> &StyleStore {
        &self.styles
    }

    pub fn model_slot(&self) -> &ModelSlot {
        &self.model
    }

    /// The lock is never held across an await point.
    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    /// Generate exactly `request.num_jokes` jokes.
    ///
    /// Only validation errors are returned. Model problems are logged and
    /// recorded in the report; the fallback always fills the batch.
    pub async fn generate_jokes(&self, request: &JokeRequest) -> Result<GenerationResult> {
        request.validate()?;
        let topic = request.topic();

        let blended = self.with_rng(|rng| blend(&self.styles, &request.style_weights, rng));
        log::debug!(
            "Blend for '{}': {} ({} examples)",
            topic,
            blended.description,
            blended.examples.len()
        );

        let (mut jokes, model) = self.attempt_model(request, &blended).await;
        jokes.truncate(request.num_jokes);
        let model_jokes = jokes.len();

        let mut from_examples = 0;
        let mut from_templates = 0;
        self.with_rng(|rng| {
            while jokes.len() < request.num_jokes {
                let (joke, source) = fallback_joke(
                    &blended.examples,
                    topic,
                    request.madness,
                    request.darkness,
                    rng,
                );
                match source {
                    FallbackSource::StyleExample => from_examples += 1,
                    FallbackSource::GenericTemplate => from_templates += 1,
                }
                jokes.push(joke);
            }
        });

        log::info!(
            "Generated {} jokes about '{}' ({} from model, {} from fallback)",
            jokes.len(),
            topic,
            model_jokes,
            from_examples + from_templates
        );

        Ok(GenerationResult {
            jokes,
            style_description: blended.description.clone(),
            report: GenerationReport {
                blend_status: blended.status,
                pool_size: blended.examples.len(),
                model,
                model_jokes,
                fallback_from_examples: from_examples,
                fallback_from_templates: from_templates,
            },
        })
    }

    async fn attempt_model(
        &self,
        request: &JokeRequest,
        blended: &BlendResult,
    ) -> (Vec<String>, ModelAttempt) {
        let provider = match self.model.ensure().await {
            Ok(provider) => provider,
            Err(e) => {
                return (
                    Vec::new(),
                    ModelAttempt::Unavailable {
                        reason: e.to_string(),
                    },
                )
            }
        };

        let excerpt = self.with_rng(|rng| sample_excerpt(&blended.examples, rng));
        let prompt = build_prompt(
            request.topic(),
            &blended.description,
            request.output_type,
            request.transition_type,
            request.madness,
            request.darkness,
            &excerpt,
        );

        let sequences = request.num_jokes.min(self.settings.max_model_sequences).max(1);
        let completion = CompletionRequest::new(prompt)
            .with_sequences(sequences as u32)
            .with_temperature(request.madness)
            .with_max_new_tokens(self.settings.max_new_tokens);

        match provider.complete(completion).await {
            Ok(response) => {
                let jokes: Vec<String> = response
                    .completions
                    .iter()
                    .filter_map(|raw| extract_joke(raw))
                    .collect();
                log::debug!(
                    "{} returned {} completions, {} usable",
                    provider.name(),
                    response.completions.len(),
                    jokes.len()
                );
                let attempt = ModelAttempt::Completed {
                    provider: response.provider,
                    model: response.model,
                    completions: response.completions.len(),
                    extracted: jokes.len(),
                };
                (jokes, attempt)
            }
            Err(e) => {
                log::warn!("Model generation failed, using fallback: {e}");
                (
                    Vec::new(),
                    ModelAttempt::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}

impl std::fmt::Debug for JokeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JokeGenerator")
            .field("styles", &self.styles.len())
            .field("model", &self.model)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
