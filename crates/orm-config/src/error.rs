//! Configuration error types.

use orm_core::errors::OrmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A setting was read but does not resolve to a valid option.
    #[error(transparent)]
    Orm(#[from] OrmError),

    /// A property has a value of the wrong shape (e.g. a non-numeric size).
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// The taxonomy failure behind a resolution error, if any.
    #[must_use]
    pub const fn as_orm(&self) -> Option<&OrmError> {
        match self {
            Self::Orm(err) => Some(err),
            Self::Figment(_) | Self::InvalidValue { .. } => None,
        }
    }
}
