//! Translation of taxonomy failures into the coarser set a standard
//! persistence API exposes.
//!
//! The original [`OrmError`] stays reachable through `source()`, so nothing
//! is lost by translating.

use thiserror::Error;

use crate::errors::{ErrorKind, Identifier, OrmError};

/// Failures as seen from outside the persistence layer.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// The referenced entity does not exist (or no longer does).
    #[error("{source}")]
    EntityNotFound { source: OrmError },

    /// An instance with the same identifier is already managed.
    #[error("{source}")]
    EntityExists { source: OrmError },

    /// A single result was expected but several matched.
    #[error("{source}")]
    NonUniqueResult { source: OrmError },

    /// A concurrent update was detected.
    #[error("{source}")]
    OptimisticLock {
        entity_name: Option<String>,
        identifier: Option<Identifier>,
        source: OrmError,
    },

    /// A pessimistic lock could not be obtained.
    #[error("{source}")]
    PessimisticLock { source: OrmError },

    /// Waiting for a lock timed out. Only the statement is rolled back.
    #[error("{source}")]
    LockTimeout { source: OrmError },

    /// A query ran past its timeout. Only the statement is rolled back.
    #[error("{source}")]
    QueryTimeout { source: OrmError },

    /// The caller passed an invalid query or parameter.
    #[error("{source}")]
    IllegalArgument { source: OrmError },

    /// The operation was invalid for the current object state.
    #[error("{source}")]
    IllegalState { source: OrmError },

    /// Any other persistence failure.
    #[error("{source}")]
    Persistence { source: OrmError },
}

impl BoundaryError {
    /// Whether the active transaction must be marked rollback-only before
    /// this failure propagates.
    #[must_use]
    pub const fn marks_rollback(&self) -> bool {
        !matches!(
            self,
            Self::NonUniqueResult { .. }
                | Self::LockTimeout { .. }
                | Self::QueryTimeout { .. }
                | Self::IllegalArgument { .. }
        )
    }

    /// The untranslated failure.
    #[must_use]
    pub const fn inner(&self) -> &OrmError {
        match self {
            Self::EntityNotFound { source }
            | Self::EntityExists { source }
            | Self::NonUniqueResult { source }
            | Self::OptimisticLock { source, .. }
            | Self::PessimisticLock { source }
            | Self::LockTimeout { source }
            | Self::QueryTimeout { source }
            | Self::IllegalArgument { source }
            | Self::IllegalState { source }
            | Self::Persistence { source } => source,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> OrmError {
        match self {
            Self::EntityNotFound { source }
            | Self::EntityExists { source }
            | Self::NonUniqueResult { source }
            | Self::OptimisticLock { source, .. }
            | Self::PessimisticLock { source }
            | Self::LockTimeout { source }
            | Self::QueryTimeout { source }
            | Self::IllegalArgument { source }
            | Self::IllegalState { source }
            | Self::Persistence { source } => source,
        }
    }
}

/// Map a taxonomy failure onto the boundary set.
///
/// Internal failures are logged at `error` here, since the boundary type no
/// longer says they are framework bugs.
pub fn translate(source: OrmError) -> BoundaryError {
    if source.is_internal() {
        tracing::error!(error = %source, "internal failure crossing persistence boundary");
    }

    match source.kind() {
        ErrorKind::StaleState | ErrorKind::StaleObjectState | ErrorKind::OptimisticEntityLock => {
            BoundaryError::OptimisticLock {
                entity_name: source.entity_name().map(str::to_string),
                identifier: source.identifier().cloned(),
                source,
            }
        }
        ErrorKind::PessimisticLock | ErrorKind::LockAcquisition => {
            BoundaryError::PessimisticLock { source }
        }
        ErrorKind::LockTimeout => BoundaryError::LockTimeout { source },
        ErrorKind::QueryTimeout => BoundaryError::QueryTimeout { source },
        ErrorKind::ObjectNotFound | ErrorKind::ObjectDeleted => {
            BoundaryError::EntityNotFound { source }
        }
        ErrorKind::NonUniqueObject => BoundaryError::EntityExists { source },
        ErrorKind::NonUniqueResult => BoundaryError::NonUniqueResult { source },
        ErrorKind::Query | ErrorKind::QueryParameter => BoundaryError::IllegalArgument { source },
        ErrorKind::TransientObject | ErrorKind::TransientPropertyValue => {
            BoundaryError::IllegalState { source }
        }
        _ => BoundaryError::Persistence { source },
    }
}

impl From<OrmError> for BoundaryError {
    fn from(source: OrmError) -> Self {
        translate(source)
    }
}
