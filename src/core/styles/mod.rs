//! Comedic styles: the example corpus, weighted blending, and the style wheel.

pub mod blender;
pub mod errors;
pub mod store;
pub mod wheel;

pub use blender::{blend, BlendResult, BlendStatus, StyleContribution, StyleWeights};
pub use errors::StyleLoadError;
pub use store::{load_styles, RawStyle, StyleEntry, StyleStore, DEFAULT_STYLE_KEY};
pub use wheel::StyleWheel;
