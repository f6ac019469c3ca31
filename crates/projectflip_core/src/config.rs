//! Store construction options.
//!
//! # Responsibility
//! - Describe how a new store is populated and how ids are generated.
//! - Reject option values the store cannot honor.
//!
//! # Invariants
//! - A validated config always has `id_length` in `MIN_ID_LENGTH..=MAX_ID_LENGTH`.

use crate::model::id::{DEFAULT_ID_LENGTH, MAX_ID_LENGTH, MIN_ID_LENGTH};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Initial content of the project and client collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Start with the fixed showcase projects and testimonials.
    #[default]
    Fixtures,
    /// Start with all four collections empty.
    Empty,
}

/// Options for `EntityStore::with_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub seed: SeedMode,
    /// Length of generated base36 ids.
    pub id_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: SeedMode::Fixtures,
            id_length: DEFAULT_ID_LENGTH,
        }
    }
}

impl StoreConfig {
    /// Returns a config that starts with empty collections.
    pub fn empty() -> Self {
        Self {
            seed: SeedMode::Empty,
            ..Self::default()
        }
    }

    /// Checks option ranges.
    ///
    /// # Errors
    /// - `ConfigError::IdLengthOutOfRange` when `id_length` is outside
    ///   `MIN_ID_LENGTH..=MAX_ID_LENGTH`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&self.id_length) {
            return Err(ConfigError::IdLengthOutOfRange {
                actual: self.id_length,
                min: MIN_ID_LENGTH,
                max: MAX_ID_LENGTH,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    IdLengthOutOfRange {
        actual: usize,
        min: usize,
        max: usize,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdLengthOutOfRange { actual, min, max } => write!(
                f,
                "id_length {actual} is out of range; expected {min}..={max}"
            ),
        }
    }
}

impl Error for ConfigError {}
