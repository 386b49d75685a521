//! Property-based tests for the generation orchestrator
//!
//! Tests invariants:
//! - Exactly `num_jokes` jokes for every valid request
//! - Every joke is non-empty
//! - Invalid requests are rejected before the model is touched

use std::sync::Arc;

use proptest::prelude::*;

use crate::core::jokes::{JokeGenerator, JokeRequest, MAX_JOKES};
use crate::core::llm::ModelSlot;
use crate::core::styles::StyleStore;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn generator(seed: u64) -> JokeGenerator {
    JokeGenerator::new(Arc::new(StyleStore::builtin().unwrap()), ModelSlot::disabled())
        .with_seed(seed)
}

proptest! {
    /// Property: the batch always has the requested size
    #[test]
    fn prop_exact_batch_size(
        num_jokes in 1usize..=20,
        madness in 0.0f32..=1.0,
        darkness in 0u8..=10,
        style in prop_oneof![Just("Default"), Just("Gallows"), Just("Missing")],
        seed in any::<u64>(),
    ) {
        let request = JokeRequest::new("office life")
            .with_style(style)
            .with_madness(madness)
            .with_darkness(darkness)
            .with_num_jokes(num_jokes);

        let result = runtime().block_on(generator(seed).generate_jokes(&request)).unwrap();

        prop_assert_eq!(result.jokes.len(), num_jokes);
        prop_assert!(result.jokes.iter().all(|j| !j.trim().is_empty()));
        prop_assert_eq!(result.report.fallback_jokes(), num_jokes);
    }

    /// Property: out-of-range counts are validation errors
    #[test]
    fn prop_out_of_range_count_rejected(num_jokes in (MAX_JOKES + 1)..(MAX_JOKES * 3)) {
        let generator = generator(0);
        let request = JokeRequest::new("cats").with_num_jokes(num_jokes);
        let err = runtime().block_on(generator.generate_jokes(&request)).unwrap_err();

        prop_assert!(err.is_validation());
        prop_assert_eq!(generator.model_slot().attempts(), 0);
    }
}
