//! Prompt Builder
//!
//! Assembles the single instruction string sent to the model. The builder is
//! pure; the caller samples the example excerpt with its own RNG.

use rand::prelude::*;

use super::types::{OutputType, TransitionType};

/// Most examples quoted in one prompt.
pub const MAX_PROMPT_EXAMPLES: usize = 6;

/// Text that opens the closing instruction. Completions are cut after it.
pub const CLOSING_MARKER: &str = "Now create a new joke";

/// Madness tiers, checked top down with strict `>`.
pub const CREATIVITY_LADDER: &[(f32, &str)] = &[
    (0.8, "very creative and unpredictable"),
    (0.6, "creative and surprising"),
    (0.4, "moderately creative"),
];
pub const CREATIVITY_FLOOR: &str = "straightforward";

/// Darkness tiers, checked top down with strict `>`.
pub const DARKNESS_LADDER: &[(u8, &str)] = &[
    (8, "extremely dark"),
    (6, "very dark"),
    (4, "moderately dark"),
    (2, "mildly dark"),
];
pub const DARKNESS_FLOOR: &str = "lightly humorous";

pub fn creativity_level(madness: f32) -> &'static str {
    CREATIVITY_LADDER
        .iter()
        .find(|(bound, _)| madness > *bound)
        .map(|(_, label)| *label)
        .unwrap_or(CREATIVITY_FLOOR)
}

pub fn darkness_level(darkness: u8) -> &'static str {
    DARKNESS_LADDER
        .iter()
        .find(|(bound, _)| darkness > *bound)
        .map(|(_, label)| *label)
        .unwrap_or(DARKNESS_FLOOR)
}

fn output_clause(output_type: OutputType, transition_type: TransitionType) -> String {
    match output_type {
        OutputType::Routines => match transition_type {
            TransitionType::None => "Create a comedy routine without explicit transitions. ".to_string(),
            other => format!(
                "Create a comedy routine with {} transitions. ",
                other.as_str().to_lowercase()
            ),
        },
        OutputType::OneLiners => "Create short, punchy one-liners. ".to_string(),
        OutputType::Punchlines => "Focus on strong, memorable punchlines. ".to_string(),
        OutputType::RandomJokes => "Mix varied joke formats. ".to_string(),
    }
}

/// Up to [`MAX_PROMPT_EXAMPLES`] examples drawn from the pool without
/// replacement.
pub fn sample_excerpt(pool: &[String], rng: &mut impl Rng) -> Vec<String> {
    pool.choose_multiple(rng, MAX_PROMPT_EXAMPLES.min(pool.len()))
        .cloned()
        .collect()
}

/// Build the model prompt.
///
/// Only the first [`MAX_PROMPT_EXAMPLES`] entries of `examples` are quoted.
pub fn build_prompt(
    topic: &str,
    style_description: &str,
    output_type: OutputType,
    transition_type: TransitionType,
    madness: f32,
    darkness: u8,
    examples: &[String],
) -> String {
    let mut prompt = format!(
        "Generate {} about '{}' using {}. ",
        output_type.as_str().to_lowercase(),
        topic,
        style_description
    );

    prompt.push_str(&output_clause(output_type, transition_type));
    prompt.push_str(&format!(
        "Make it {} and {}. ",
        creativity_level(madness),
        darkness_level(darkness)
    ));

    if !examples.is_empty() {
        prompt.push_str("\n\nStyle examples:\n");
        for (i, example) in examples.iter().take(MAX_PROMPT_EXAMPLES).enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, example));
        }
    }

    prompt.push_str(&format!("\n{CLOSING_MARKER} about '{topic}':\n"));
    prompt
}
