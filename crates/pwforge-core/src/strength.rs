// ── Strength classification ──
//
// Five independent predicates, one point each. The symbol predicate uses
// its own detection set, which overlaps with but differs from the
// generation set in `charset::SYMBOLS`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbols that count toward the strength score.
pub const DETECTION_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum length (in characters) that earns the length point.
pub const STRENGTH_MIN_LENGTH: usize = 8;

/// Coarse strength of a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrengthRating {
    /// No password has been generated yet.
    #[default]
    Unrated,
    Weak,
    Medium,
    Strong,
}

impl StrengthRating {
    /// Map a predicate score to a rating.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => Self::Weak,
            2 | 3 => Self::Medium,
            4 | 5 => Self::Strong,
            _ => Self::Unrated,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unrated => "",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }

    pub fn is_rated(self) -> bool {
        !matches!(self, Self::Unrated)
    }
}

impl fmt::Display for StrengthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count satisfied predicates (0..=5).
pub fn score(password: &str) -> u8 {
    let predicates = [
        password.chars().count() >= STRENGTH_MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| DETECTION_SYMBOLS.contains(c)),
    ];
    predicates.iter().fold(0, |acc, hit| acc + u8::from(*hit))
}

/// Classify `password`. Pure: the same input always yields the same rating.
pub fn classify(password: &str) -> StrengthRating {
    StrengthRating::from_score(score(password))
}
