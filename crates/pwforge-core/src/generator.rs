// ── Password generation ──
//
// Uniform draws with replacement from the character pool. The pool is
// rebuilt per call; it is at most 91 characters.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::trace;

use crate::charset::character_pool;
use crate::error::CoreError;
use crate::model::{GeneratorConfig, Password};

/// Generate a password using the thread-local RNG.
pub fn generate(config: &GeneratorConfig) -> Result<Password, CoreError> {
    generate_with(config, &mut rand::rng())
}

/// Generate a password drawing from `rng`.
///
/// Fails with [`CoreError::InvalidLength`] for lengths outside the
/// supported range and with [`CoreError::EmptyPool`] when every class is
/// disabled. Never falls back to an implicit pool.
pub fn generate_with<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Password, CoreError> {
    config.validate()?;

    let pool = character_pool(config);
    if pool.is_empty() {
        return Err(CoreError::EmptyPool);
    }

    let mut value = String::with_capacity(config.length);
    for _ in 0..config.length {
        let c = pool.choose(rng).ok_or(CoreError::EmptyPool)?;
        value.push(*c);
    }

    trace!(length = config.length, pool_size = pool.len(), "generated password");
    Ok(Password::new(value))
}
