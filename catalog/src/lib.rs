#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ordered, read-only table of level definitions.
//!
//! Levels are described in TOML as an array of `[[levels]]` tables. The crate
//! embeds a default table so the game can boot without any file on disk.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use duck_hunt_core::{LevelDefinition, LevelId};
use serde::Deserialize;
use thiserror::Error;

/// Level table shipped with the game.
pub const DEFAULT_LEVELS: &str = include_str!("levels.toml");

/// Ordered list of level definitions loaded once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Loads the embedded default level table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(DEFAULT_LEVELS)
    }

    /// Parses and validates a TOML level table.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let document: Document = toml::from_str(contents)?;
        Self::from_levels(document.levels)
    }

    /// Reads, parses and validates the level table stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&contents)?;
        log::debug!(
            "loaded {} levels from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Validates an already constructed list of levels.
    pub fn from_levels(levels: Vec<LevelDefinition>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(levels.len());
        for level in &levels {
            validate_level(level)?;
            if !seen.insert(level.id()) {
                return Err(CatalogError::DuplicateLevel(level.id()));
            }
        }

        Ok(Self { levels })
    }

    /// Retrieves the level stored at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    /// Number of levels in the catalog. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates over the levels in play order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    levels: Vec<LevelDefinition>,
}

fn validate_level(level: &LevelDefinition) -> Result<(), CatalogError> {
    let reason = if level.duck_count() == 0 {
        Some("ducks must be positive")
    } else if level.wave_count() == 0 {
        Some("waves must be positive")
    } else if level.bullets_per_wave() == 0 {
        Some("bullets must be positive")
    } else if !level.time_limit_seconds().is_finite() || level.time_limit_seconds() <= 0.0 {
        Some("time must be a positive number of seconds")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidLevel {
            id: level.id(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Errors that can occur while loading a level table.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The level file could not be read.
    #[error("failed to read level table at {}", path.display())]
    Io {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level table is not valid TOML or has the wrong shape.
    #[error("failed to parse level table")]
    Parse(#[from] toml::de::Error),
    /// The level table contains no levels.
    #[error("level table contains no levels")]
    Empty,
    /// Two levels share an identifier.
    #[error("level {0} is defined more than once")]
    DuplicateLevel(LevelId),
    /// A level has unusable parameters.
    #[error("level {id} is invalid: {reason}")]
    InvalidLevel {
        /// Identifier of the offending level.
        id: LevelId,
        /// Description of the failed check.
        reason: &'static str,
    },
}
