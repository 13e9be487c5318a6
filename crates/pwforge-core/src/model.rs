// ── Generator domain types ──

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::charset::CharClass;
use crate::error::CoreError;

/// Shortest password the generator produces.
pub const MIN_LENGTH: usize = 8;
/// Longest password the generator produces.
pub const MAX_LENGTH: usize = 32;
/// Length used when nothing else is configured.
pub const DEFAULT_LENGTH: usize = 12;

/// Inputs to the generator: a length and the four class toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorConfig {
    pub length: usize,
    pub use_upper: bool,
    pub use_lower: bool,
    pub use_digits: bool,
    pub use_symbols: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            use_upper: true,
            use_lower: true,
            use_digits: true,
            use_symbols: true,
        }
    }
}

impl GeneratorConfig {
    /// Default length with every class disabled.
    pub fn none_enabled() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            use_upper: false,
            use_lower: false,
            use_digits: false,
            use_symbols: false,
        }
    }

    pub fn is_enabled(&self, class: CharClass) -> bool {
        match class {
            CharClass::Upper => self.use_upper,
            CharClass::Lower => self.use_lower,
            CharClass::Digits => self.use_digits,
            CharClass::Symbols => self.use_symbols,
        }
    }

    pub fn set_enabled(&mut self, class: CharClass, enabled: bool) {
        let flag = match class {
            CharClass::Upper => &mut self.use_upper,
            CharClass::Lower => &mut self.use_lower,
            CharClass::Digits => &mut self.use_digits,
            CharClass::Symbols => &mut self.use_symbols,
        };
        *flag = enabled;
    }

    /// Enabled classes in pool order.
    pub fn enabled_classes(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(|c| self.is_enabled(*c))
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled_classes().next().is_some()
    }

    /// Reject lengths outside `MIN_LENGTH..=MAX_LENGTH`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if (MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            Ok(())
        } else {
            Err(CoreError::InvalidLength {
                length: self.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            })
        }
    }
}

/// Clamp an arbitrary length into the supported range.
pub fn clamp_length(length: usize) -> usize {
    length.clamp(MIN_LENGTH, MAX_LENGTH)
}

/// A generated password. Immutable once built.
///
/// Backed by a [`SecretString`]: `Debug` is redacted, there is no
/// `Display`, and the buffer is zeroized on drop. Reading the characters
/// takes an explicit [`ExposeSecret::expose_secret`].
#[derive(Debug)]
pub struct Password {
    secret: SecretString,
}

impl Password {
    pub(crate) fn new(value: String) -> Self {
        Self {
            secret: SecretString::from(value),
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.secret.expose_secret().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.secret.expose_secret().is_empty()
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl ExposeSecret<str> for Password {
    fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}
