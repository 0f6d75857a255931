//! Tuning values that are not part of the level table.

use duck_hunt_core::SuccessRatio;
use serde::Deserialize;
use thiserror::Error;

/// Game-wide tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameConfig {
    success_ratio: SuccessRatio,
}

impl GameConfig {
    /// Creates a configuration with the provided pass threshold.
    #[must_use]
    pub const fn new(success_ratio: SuccessRatio) -> Self {
        Self { success_ratio }
    }

    /// Parses a TOML document such as `success_ratio = 0.7`.
    ///
    /// Omitted keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)?;
        let mut config = Self::default();
        if let Some(value) = raw.success_ratio {
            config.success_ratio =
                SuccessRatio::new(value).ok_or(ConfigError::InvalidSuccessRatio(value))?;
        }
        Ok(config)
    }

    /// Fraction of a level's ducks that must be shot to pass it.
    #[must_use]
    pub const fn success_ratio(&self) -> SuccessRatio {
        self.success_ratio
    }

    /// Returns a copy using `success_ratio` instead.
    #[must_use]
    pub const fn with_success_ratio(self, success_ratio: SuccessRatio) -> Self {
        Self { success_ratio }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    success_ratio: Option<f32>,
}

/// Errors that can occur while loading the game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or contains unknown keys.
    #[error("failed to parse game configuration")]
    Parse(#[from] toml::de::Error),
    /// The success ratio lies outside `(0, 1]`.
    #[error("success ratio {0} must lie in (0, 1]")]
    InvalidSuccessRatio(f32),
}
