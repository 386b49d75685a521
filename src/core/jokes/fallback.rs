//! Template fallback.
//!
//! Produces jokes without a model, either by re-targeting a style example at
//! the topic or from a fixed set of generic templates. This path cannot fail.

use once_cell::sync::Lazy;
use rand::prelude::*;
use regex::{NoExpand, Regex};
use serde::Serialize;

/// Darkness above this prepends a grim opener.
pub const DARK_PREFIX_THRESHOLD: u8 = 7;

/// Madness above this appends a surreal tag.
pub const WEIRD_SUFFIX_THRESHOLD: f32 = 0.8;

pub const DARK_PREFIXES: &[&str] = &["In the darkest timeline, ", "When hope dies, "];

pub const WEIRD_SUFFIXES: &[&str] = &[" ...or does it?", " in an alternate reality"];

/// Always available, whatever else is missing.
pub const DEFAULT_TEMPLATE: &str = "I told my therapist about {topic}. Now we both need therapy.";

pub const GENERIC_TEMPLATES: &[&str] = &[
    DEFAULT_TEMPLATE,
    "I tried to understand {topic}. {topic} tried to understand me. We both gave up.",
    "My relationship with {topic} is complicated. Mostly because {topic} doesn't know I exist.",
    "They say {topic} builds character. I must be a whole novel by now.",
    "I'd explain {topic} to you, but I'm still waiting for someone to explain it to me.",
];

pub const DARK_GENERIC_TEMPLATES: &[&str] = &[
    DEFAULT_TEMPLATE,
    "{topic} is like a funeral. Everyone pretends to be fine and nobody brought snacks.",
    "I asked for a sign about {topic}. It was a headstone.",
    "My will leaves everything to {topic}. It already took the rest.",
];

static TOPIC_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:life|work|people)\b").expect("Invalid topic word regex"));

/// Where a fallback joke came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackSource {
    StyleExample,
    GenericTemplate,
}

/// Replace every standalone "life", "work" or "people" with the topic in a
/// single pass, so a topic containing those words is never re-substituted.
pub fn substitute_topic(example: &str, topic: &str) -> String {
    TOPIC_WORDS.replace_all(example, NoExpand(topic)).into_owned()
}

/// Fill a generic template with the topic.
pub fn render_template(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}

/// Produce one fallback joke.
pub fn fallback_joke(
    pool: &[String],
    topic: &str,
    madness: f32,
    darkness: u8,
    rng: &mut impl Rng,
) -> (String, FallbackSource) {
    let Some(example) = pool.choose(rng) else {
        let templates = if darkness > DARK_PREFIX_THRESHOLD {
            DARK_GENERIC_TEMPLATES
        } else {
            GENERIC_TEMPLATES
        };
        let template = templates.choose(rng).copied().unwrap_or(DEFAULT_TEMPLATE);
        return (render_template(template, topic), FallbackSource::GenericTemplate);
    };

    let mut joke = if darkness > DARK_PREFIX_THRESHOLD {
        let prefix = DARK_PREFIXES.choose(rng).copied().unwrap_or_default();
        format!("{prefix}{}", substitute_topic(example, topic).to_lowercase())
    } else {
        substitute_topic(example, topic)
    };

    if madness > WEIRD_SUFFIX_THRESHOLD {
        if let Some(suffix) = WEIRD_SUFFIXES.choose(rng) {
            joke.push_str(suffix);
        }
    }

    (joke, FallbackSource::StyleExample)
}
