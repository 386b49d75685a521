//! Style Blender
//!
//! Samples example jokes from each weighted style in proportion to its
//! weight and produces a readable description of the mix.

use indexmap::IndexMap;
use rand::prelude::*;
use serde::Serialize;

use super::store::StyleStore;

/// Style key to weight. Insertion order drives sampling order.
pub type StyleWeights = IndexMap<String, f32>;

/// Number of examples a style with weight 1.0 contributes.
pub const SAMPLES_PER_UNIT_WEIGHT: f32 = 6.0;

/// Styles at or below this weight are sampled but not named.
pub const LABEL_THRESHOLD: f32 = 0.2;

/// Description used when no style is significant enough to name.
pub const DEFAULT_DESCRIPTION: &str = "Default style";

const BLEND_SEPARATOR: &str = " blended with ";

// ============================================================================
// Result Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendStatus {
    /// At least one example was sampled.
    Blended,
    /// No style contributed; callers fall back to generic templates.
    Empty,
}

/// What one style put into the pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleContribution {
    pub key: String,
    pub weight: f32,
    pub sampled: usize,
    pub labelled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlendResult {
    pub examples: Vec<String>,
    pub description: String,
    pub contributions: Vec<StyleContribution>,
    pub status: BlendStatus,
}

impl BlendResult {
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

// ============================================================================
// Blending
// ============================================================================

/// How many examples a style of the given weight contributes, before capping
/// at the corpus size.
pub fn sample_count(weight: f32) -> usize {
    ((SAMPLES_PER_UNIT_WEIGHT * weight).floor() as usize).max(1)
}

/// Blend the weighted styles into a combined example pool.
///
/// Weights that are zero, negative or NaN exclude the style. Unknown keys
/// and styles with an empty corpus are skipped silently.
pub fn blend(store: &StyleStore, weights: &StyleWeights, rng: &mut impl Rng) -> BlendResult {
    let mut examples = Vec::new();
    let mut labels = Vec::new();
    let mut contributions = Vec::new();

    for (key, &weight) in weights {
        if weight.is_nan() || weight <= 0.0 {
            continue;
        }
        let Some(style) = store.get(key) else {
            log::debug!("Skipping unknown style '{key}'");
            continue;
        };
        if style.examples.is_empty() {
            continue;
        }

        let count = sample_count(weight).min(style.examples.len());
        examples.extend(
            style
                .examples
                .choose_multiple(rng, count)
                .cloned(),
        );

        let labelled = weight > LABEL_THRESHOLD;
        if labelled {
            labels.push(format!(
                "{} ({}%)",
                style.display_name,
                (weight * 100.0).round_ties_even() as i64
            ));
        }

        contributions.push(StyleContribution {
            key: key.clone(),
            weight,
            sampled: count,
            labelled,
        });
    }

    let description = if labels.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        labels.join(BLEND_SEPARATOR)
    };

    let status = if examples.is_empty() {
        BlendStatus::Empty
    } else {
        BlendStatus::Blended
    };

    BlendResult {
        examples,
        description,
        contributions,
        status,
    }
}
