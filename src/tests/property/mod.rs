//! Property-based tests for the joke generator
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `blender_props`: Style blending
//!   - Pool size is bounded by the weights and the corpus
//!   - Only weights above the label threshold are labelled
//!   - Non-positive weights never contribute
//!
//! - `wheel_props`: Style wheel positions
//!   - Weights are non-negative and sum to one
//!   - The dead zone always maps to the centre style
//!
//! - `fallback_props`: Template fallback
//!   - The topic always appears in the joke
//!   - Dark prefixes only appear above the darkness threshold
//!
//! - `generator_props`: Generation orchestrator
//!   - Exactly `num_jokes` jokes for every valid request
//!   - Invalid requests are rejected before the model is touched
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod blender_props;
mod fallback_props;
mod generator_props;
mod wheel_props;
