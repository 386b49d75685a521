pub mod jokes;
pub mod llm;
pub mod logging;

// Style corpus, weighted blending and the style wheel
pub mod styles;
