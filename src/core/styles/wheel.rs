//! Style Wheel
//!
//! Converts a cursor position on the circular style picker into style
//! weights. The default style sits at the centre; every other style sits on
//! the rim at a fixed angle. Moving the cursor outward trades default weight
//! for the styles nearest the cursor's bearing.

use super::blender::StyleWeights;
use super::store::{StyleStore, DEFAULT_STYLE_KEY};

/// Radius of the picker in pixels.
pub const DEFAULT_RADIUS: f32 = 200.0;

/// Cursor positions closer than this many pixels count as the centre.
pub const DEAD_ZONE_PX: f32 = 5.0;

/// Angular reach of a rim style, in degrees.
pub const ANGULAR_REACH_DEG: f32 = 60.0;

/// Rim styles below this raw weight are dropped before normalizing.
pub const MIN_RIM_WEIGHT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct StyleWheel {
    default_key: String,
    rim: Vec<(String, f32)>,
    radius: f32,
}

impl StyleWheel {
    pub fn new(default_key: impl Into<String>, rim: Vec<(String, f32)>) -> Self {
        Self {
            default_key: default_key.into(),
            rim,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Lay out the wheel from the store's default and rim styles.
    pub fn from_store(store: &StyleStore) -> Self {
        let default_key = store
            .default_style()
            .map(|s| s.key.clone())
            .unwrap_or_else(|| DEFAULT_STYLE_KEY.to_string());
        let rim = store
            .wheel_styles()
            .filter_map(|s| s.angle.map(|a| (s.key.clone(), a)))
            .collect();
        Self::new(default_key, rim)
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        if radius > 0.0 {
            self.radius = radius;
        }
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Weights for a cursor offset `(dx, dy)` from the centre, in pixels.
    /// Offsets beyond the rim are clamped onto it.
    pub fn weights_at(&self, dx: f32, dy: f32) -> StyleWeights {
        let distance = dx.hypot(dy).min(self.radius);
        if !distance.is_finite() {
            return self.centre();
        }
        let bearing = dy.atan2(dx).to_degrees();
        self.weights_polar(bearing, distance / self.radius)
    }

    /// Weights for a bearing in degrees and a distance as a fraction of the
    /// radius (clamped to `[0, 1]`).
    pub fn weights_polar(&self, bearing_deg: f32, distance_ratio: f32) -> StyleWeights {
        if !bearing_deg.is_finite() || !distance_ratio.is_finite() {
            return self.centre();
        }
        let ratio = distance_ratio.clamp(0.0, 1.0);
        if ratio * self.radius < DEAD_ZONE_PX {
            return self.centre();
        }

        let mut weights = StyleWeights::new();
        weights.insert(self.default_key.clone(), (1.0 - ratio).max(0.0));

        for (key, angle) in &self.rim {
            let diff = angular_distance(bearing_deg, *angle);
            let proximity = (1.0 - diff / ANGULAR_REACH_DEG).max(0.0);
            let weight = proximity * ratio;
            if weight > MIN_RIM_WEIGHT {
                weights.insert(key.clone(), weight);
            }
        }

        let total: f32 = weights.values().sum();
        if total <= 0.0 {
            return self.centre();
        }
        for weight in weights.values_mut() {
            *weight /= total;
        }
        weights
    }

    fn centre(&self) -> StyleWeights {
        let mut weights = StyleWeights::new();
        weights.insert(self.default_key.clone(), 1.0);
        weights
    }
}

/// Smallest angle between two bearings, in `[0, 180]`.
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
