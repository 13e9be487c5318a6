// ── Core error types ──
//
// Generation is the only fallible operation in this crate. Classification
// is total over every input string.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No character classes enabled: the character pool is empty")]
    EmptyPool,

    #[error("Password length {length} is outside the supported range {min}..={max}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
}
