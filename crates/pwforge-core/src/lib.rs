//! Password generation and strength classification.
//!
//! Two pure components shared by every pwforge front end:
//!
//! - **Generator** ([`generate`], [`generate_with`]) — maps a
//!   [`GeneratorConfig`] (length plus four [`CharClass`] toggles) to a
//!   [`Password`] drawn uniformly, with replacement, from the concatenated
//!   alphabets of the enabled classes. An empty pool is an explicit
//!   [`CoreError::EmptyPool`], never a silent fallback.
//!
//! - **Strength classifier** ([`classify`], [`score`]) — scores five
//!   independent predicates (length, lowercase, uppercase, digit, symbol)
//!   and maps the score to a [`StrengthRating`].

pub mod charset;
pub mod error;
pub mod generator;
pub mod model;
pub mod strength;

// ── Primary re-exports ──────────────────────────────────────────────
pub use charset::{CharClass, character_pool};
pub use error::CoreError;
pub use generator::{generate, generate_with};
pub use model::{
    DEFAULT_LENGTH, GeneratorConfig, MAX_LENGTH, MIN_LENGTH, Password, clamp_length,
};
pub use strength::{StrengthRating, classify, score};
