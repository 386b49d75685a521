//! Property-based tests for the style wheel
//!
//! Tests invariants:
//! - Weights are non-negative and sum to one
//! - The dead zone always maps to the centre style
//! - At the rim the centre style has no weight

use proptest::prelude::*;

use crate::core::styles::wheel::angular_distance;
use crate::core::styles::{StyleStore, StyleWheel};

fn wheel() -> StyleWheel {
    StyleWheel::from_store(&StyleStore::builtin().unwrap())
}

proptest! {
    /// Property: weights form a distribution
    #[test]
    fn prop_weights_sum_to_one(dx in -400.0f32..400.0, dy in -400.0f32..400.0) {
        let weights = wheel().weights_at(dx, dy);
        let total: f32 = weights.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-4, "total was {}", total);
        prop_assert!(weights.values().all(|w| *w >= 0.0));
    }

    /// Property: within the dead zone only the centre style is selected
    #[test]
    fn prop_dead_zone_is_centre(dx in -3.0f32..3.0, dy in -3.0f32..3.0) {
        let weights = wheel().weights_at(dx, dy);
        prop_assert_eq!(weights.len(), 1);
        prop_assert_eq!(weights.get("Default").copied(), Some(1.0));
    }

    /// Property: on or past the rim the centre style drops out entirely
    #[test]
    fn prop_rim_excludes_centre(bearing in -360.0f32..360.0, ratio in 1.0f32..5.0) {
        let weights = wheel().weights_polar(bearing, ratio);
        prop_assert_eq!(weights.get("Default").copied(), Some(0.0));
        prop_assert!(weights.len() >= 2);
    }

    /// Property: angular distance is symmetric and within [0, 180]
    #[test]
    fn prop_angular_distance_bounds(a in -720.0f32..720.0, b in -720.0f32..720.0) {
        let d = angular_distance(a, b);
        prop_assert!((0.0..=180.0 + 1e-3).contains(&d));
        prop_assert!((d - angular_distance(b, a)).abs() < 1e-2);
    }
}
