//! Property-based tests for style blending
//!
//! Tests invariants:
//! - Pool size is bounded by the weights and the corpus
//! - Only weights above the label threshold are labelled
//! - Non-positive weights never contribute

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::styles::blender::{sample_count, DEFAULT_DESCRIPTION, LABEL_THRESHOLD};
use crate::core::styles::{blend, BlendStatus, StyleStore, StyleWeights};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn builtin() -> StyleStore {
    StyleStore::builtin().unwrap()
}

/// Weights over a mix of known and unknown style keys
fn arb_weights() -> impl Strategy<Value = StyleWeights> {
    let key = prop_oneof![
        Just("Default".to_string()),
        Just("Sarcastic".to_string()),
        Just("Gallows".to_string()),
        Just("Absurdist".to_string()),
        Just("Deadpan".to_string()),
        Just("NoSuchStyle".to_string()),
    ];
    prop::collection::vec((key, -1.0f32..2.0), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: every contributing style adds between 1 and floor(6w) examples
    #[test]
    fn prop_pool_size_bounded(weights in arb_weights(), seed in any::<u64>()) {
        let store = builtin();
        let result = blend(&store, &weights, &mut StdRng::seed_from_u64(seed));

        let upper: usize = weights
            .iter()
            .filter(|(_, w)| **w > 0.0)
            .filter_map(|(k, w)| store.get(k).map(|s| sample_count(*w).min(s.examples.len())))
            .sum();
        prop_assert_eq!(result.examples.len(), upper);
        prop_assert!(result.examples.len() >= result.contributions.len());
    }

    /// Property: a style is labelled iff its weight exceeds the threshold
    #[test]
    fn prop_labels_follow_threshold(weights in arb_weights(), seed in any::<u64>()) {
        let store = builtin();
        let result = blend(&store, &weights, &mut StdRng::seed_from_u64(seed));

        for contribution in &result.contributions {
            prop_assert_eq!(contribution.labelled, contribution.weight > LABEL_THRESHOLD);
        }
        if result.contributions.iter().all(|c| !c.labelled) {
            prop_assert_eq!(result.description.as_str(), DEFAULT_DESCRIPTION);
        }
    }

    /// Property: non-positive weights never contribute
    #[test]
    fn prop_non_positive_weights_excluded(weights in arb_weights(), seed in any::<u64>()) {
        let result = blend(&builtin(), &weights, &mut StdRng::seed_from_u64(seed));
        prop_assert!(result.contributions.iter().all(|c| c.weight > 0.0));
        prop_assert_eq!(
            result.status == BlendStatus::Empty,
            result.examples.is_empty()
        );
    }

    /// Property: sampled examples come from the style's own corpus
    #[test]
    fn prop_examples_from_corpus(weight in 0.01f32..3.0, seed in any::<u64>()) {
        let store = builtin();
        let weights: StyleWeights = [("Deadpan".to_string(), weight)].into_iter().collect();
        let result = blend(&store, &weights, &mut StdRng::seed_from_u64(seed));

        let corpus = &store.get("Deadpan").unwrap().examples;
        prop_assert!(result.examples.iter().all(|e| corpus.contains(e)));
    }
}
