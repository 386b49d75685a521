//! Property-based tests for the template fallback
//!
//! Tests invariants:
//! - The topic always appears in the joke (case-insensitively when dark)
//! - Dark prefixes only appear above the darkness threshold
//! - Weird suffixes only appear above the madness threshold

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::jokes::fallback::{
    fallback_joke, DARK_PREFIXES, DARK_PREFIX_THRESHOLD, WEIRD_SUFFIXES, WEIRD_SUFFIX_THRESHOLD,
};
use crate::core::styles::StyleStore;

/// A pool drawn from the bundled corpus, possibly empty
fn arb_pool() -> impl Strategy<Value = Vec<String>> {
    let corpus: Vec<String> = StyleStore::builtin()
        .unwrap()
        .iter()
        .flat_map(|s| s.examples.clone())
        .collect();
    prop::sample::subsequence(corpus.clone(), 0..=corpus.len().min(8))
}

proptest! {
    /// Property: the topic is present, lower-cased along with the body when dark
    #[test]
    fn prop_topic_present(
        pool in arb_pool(),
        topic in "[A-Za-z][A-Za-z ]{0,18}[A-Za-z]",
        madness in 0.0f32..=1.0,
        darkness in 0u8..=10,
        seed in any::<u64>(),
    ) {
        let (joke, _) = fallback_joke(&pool, &topic, madness, darkness, &mut StdRng::seed_from_u64(seed));
        if darkness > DARK_PREFIX_THRESHOLD {
            prop_assert!(
                joke.to_lowercase().contains(&topic.to_lowercase()),
                "{:?} missing from {:?}", topic, joke
            );
        } else {
            prop_assert!(joke.contains(&topic), "{:?} missing from {:?}", topic, joke);
        }
    }

    /// Property: prefixes and suffixes follow their thresholds
    #[test]
    fn prop_decorations_follow_thresholds(
        pool in arb_pool().prop_filter("non-empty pool", |p| !p.is_empty()),
        madness in 0.0f32..=1.0,
        darkness in 0u8..=10,
        seed in any::<u64>(),
    ) {
        let (joke, _) = fallback_joke(&pool, "taxes", madness, darkness, &mut StdRng::seed_from_u64(seed));

        let prefixed = DARK_PREFIXES.iter().any(|p| joke.starts_with(p));
        prop_assert_eq!(prefixed, darkness > DARK_PREFIX_THRESHOLD);

        if madness <= WEIRD_SUFFIX_THRESHOLD {
            prop_assert!(!WEIRD_SUFFIXES.iter().any(|s| joke.ends_with(s)));
        } else {
            prop_assert!(WEIRD_SUFFIXES.iter().any(|s| joke.ends_with(s)));
        }
    }
}
