//! Shared configuration for pwforge front ends.
//!
//! Built-in defaults, an optional TOML file, and `PWFORGE_*` environment
//! variables are layered with figment and translated into a
//! [`pwforge_core::GeneratorConfig`] plus UI timing settings. Nothing is
//! ever written back: settings live for one session only.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use pwforge_core::{DEFAULT_LENGTH, GeneratorConfig, MAX_LENGTH, MIN_LENGTH};

/// Prefix for environment overrides, e.g. `PWFORGE_GENERATOR__LENGTH=16`.
pub const ENV_PREFIX: &str = "PWFORGE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Initial generator settings.
    #[serde(default)]
    pub generator: GeneratorDefaults,

    /// Terminal UI behaviour.
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorDefaults {
    #[serde(default = "default_length")]
    pub length: usize,

    #[serde(default = "enabled")]
    pub uppercase: bool,

    #[serde(default = "enabled")]
    pub lowercase: bool,

    #[serde(default = "enabled")]
    pub digits: bool,

    #[serde(default = "enabled")]
    pub symbols: bool,
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self {
            length: default_length(),
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// How long the "copied" confirmation stays visible.
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,

    /// Capture mouse clicks on toggles, the length gauge and the output.
    #[serde(default = "enabled")]
    pub mouse: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            copy_feedback_ms: default_copy_feedback_ms(),
            mouse: true,
        }
    }
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}
fn default_copy_feedback_ms() -> u64 {
    2000
}
fn enabled() -> bool {
    true
}

impl Config {
    /// Check ranges figment cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.generator.length) {
            return Err(ConfigError::Validation {
                field: "generator.length".into(),
                reason: format!(
                    "expected {MIN_LENGTH}..={MAX_LENGTH}, got {}",
                    self.generator.length
                ),
            });
        }
        if self.ui.copy_feedback_ms == 0 {
            return Err(ConfigError::Validation {
                field: "ui.copy_feedback_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Initial generator state derived from this config.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            length: self.generator.length,
            use_upper: self.generator.uppercase,
            use_lower: self.generator.lowercase,
            use_digits: self.generator.digits,
            use_symbols: self.generator.symbols,
        }
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.ui.copy_feedback_ms)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "pwforge", "pwforge").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pwforge");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load and validate the config from `path` + environment.
///
/// A missing file is not an error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    extract(file_figment(path).merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// Defaults layered under the TOML file, without environment overrides.
fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning the defaults on any failure.
pub fn load_config_or_default() -> Config {
    match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default config");
            Config::default()
        }
    }
}
