//! Settings loaded from a TOML file.
//!
//! ```toml
//! [limits]
//! max_factorial = 20
//! max_magnitude = 1_000_000_000_000
//!
//! [rules]
//! unique_digits = true
//!
//! [chat]
//! reserved_prefixes = ["?", "\\"]
//! ```
//!
//! Every key is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::interpreter::evaluator::core::{Context, MAX_FACTORIAL, MAX_MAGNITUDE};

/// Errors raised while loading [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// The path that was tried.
        path:   PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Settings`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All configurable behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Evaluation bounds.
    pub limits: LimitSettings,
    /// Optional game rules.
    pub rules:  RuleSettings,
    /// Chat boundary behaviour.
    pub chat:   ChatSettings,
}

/// Caps that keep evaluation cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitSettings {
    /// Largest operand accepted by `!`.
    pub max_factorial: u32,
    /// Largest magnitude a power may produce.
    pub max_magnitude: u64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self { max_factorial: MAX_FACTORIAL,
               max_magnitude: MAX_MAGNITUDE, }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSettings {
    /// Each digit may appear at most once per expression.
    pub unique_digits: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatSettings {
    /// Messages starting with any of these are never evaluated.
    pub reserved_prefixes: Vec<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self { reserved_prefixes: vec!["?".to_string(), "\\".to_string()] }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
                                                        ConfigError::Read { path: path.to_path_buf(),
                                                                            source }
                                                    })?;
        let settings = Self::from_toml_str(&content)?;
        info!(?settings, "Config loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on invalid TOML or unknown keys.
    ///
    /// # Example
    /// ```
    /// use sixcount::config::Settings;
    ///
    /// let settings = Settings::from_toml_str("[rules]\nunique_digits = true").unwrap();
    /// assert!(settings.rules.unique_digits);
    /// assert_eq!(settings.limits.max_factorial, 20);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The evaluation context these settings describe.
    #[must_use]
    pub const fn context(&self) -> Context {
        Context { max_factorial: self.limits.max_factorial,
                  max_magnitude: self.limits.max_magnitude,
                  unique_digits: self.rules.unique_digits, }
    }
}
