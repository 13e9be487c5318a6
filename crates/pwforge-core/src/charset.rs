// ── Character classes and the generation pool ──

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::GeneratorConfig;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";

/// Symbols eligible for generation. This is an external contract and is
/// NOT the same set the strength classifier detects
/// (see [`crate::strength::DETECTION_SYMBOLS`]).
pub const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

/// One of the four character categories a password can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Upper,
    Lower,
    Digits,
    Symbols,
}

impl CharClass {
    /// All classes in pool order.
    pub const ALL: [CharClass; 4] = [Self::Upper, Self::Lower, Self::Digits, Self::Symbols];

    /// The fixed alphabet this class contributes to the pool.
    pub fn alphabet(self) -> &'static str {
        match self {
            Self::Upper => UPPERCASE,
            Self::Lower => LOWERCASE,
            Self::Digits => DIGITS,
            Self::Symbols => SYMBOLS,
        }
    }

    /// Human-readable label, as shown next to the toggle.
    pub fn label(self) -> &'static str {
        match self {
            Self::Upper => "Uppercase",
            Self::Lower => "Lowercase",
            Self::Digits => "Numbers",
            Self::Symbols => "Special Characters",
        }
    }

    pub fn contains(self, c: char) -> bool {
        self.alphabet().contains(c)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the character pool for `config`.
///
/// Enabled alphabets are concatenated in [`CharClass::ALL`] order, so the
/// result is deterministic for a given config. An empty vector means no
/// class is enabled.
pub fn character_pool(config: &GeneratorConfig) -> Vec<char> {
    CharClass::ALL
        .iter()
        .filter(|class| config.is_enabled(**class))
        .flat_map(|class| class.alphabet().chars())
        .collect()
}
