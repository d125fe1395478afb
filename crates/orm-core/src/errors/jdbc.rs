//! Failures raised while talking to the database, and lock conflicts.
//!
//! Every statement-level leaf carries the SQL text (when known) and the
//! [`DriverError`] it wraps; SQLSTATE and vendor code are read from the
//! driver error rather than copied. The shared `[driver] [sql]` fragment is
//! appended after the leaf's own message, and leaves with more context append
//! after that.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::context::{Cause, DriverError, Identifier, bracketed, info_string};
use super::{ErrorKind, OrmError};
use crate::options::LockMode;

/// Which kind of constraint a statement violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
    Other,
}

impl ConstraintKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign_key",
            Self::NotNull => "not_null",
            Self::Check => "check",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ` [driver message] [sql]`, the fragment every statement-level leaf appends.
fn statement_fragment(driver: &DriverError, sql: Option<&str>) -> String {
    format!(" [{driver}]{}", bracketed(sql))
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn constraint_fragment(name: Option<&str>, kind: &ConstraintKind) -> String {
    match name {
        Some(name) => format!(" [constraint {name} ({kind})]"),
        None => format!(" [constraint ({kind})]"),
    }
}

#[derive(Debug, Error)]
pub enum JdbcError {
    /// A statement failed for a reason no converter recognized.
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    Generic {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// The database rejected the SQL as malformed.
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    SqlGrammar {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// An integrity constraint was violated.
    #[error(
        "{message}{}{}",
        statement_fragment(.driver, .sql.as_deref()),
        constraint_fragment(.constraint_name.as_deref(), .constraint_kind)
    )]
    ConstraintViolation {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
        constraint_name: Option<String>,
        constraint_kind: ConstraintKind,
    },

    /// A value did not fit the column (truncation, conversion, range).
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    Data {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// The connection could not be obtained or was lost.
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    Connection {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// The statement ran past its timeout or was cancelled.
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    QueryTimeout {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },
}

impl JdbcError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::Generic { .. } => ErrorKind::GenericJdbc,
            Self::SqlGrammar { .. } => ErrorKind::SqlGrammar,
            Self::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            Self::Data { .. } => ErrorKind::DataError,
            Self::Connection { .. } => ErrorKind::JdbcConnection,
            Self::QueryTimeout { .. } => ErrorKind::QueryTimeout,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::Generic { message, .. }
            | Self::SqlGrammar { message, .. }
            | Self::ConstraintViolation { message, .. }
            | Self::Data { message, .. }
            | Self::Connection { message, .. }
            | Self::QueryTimeout { message, .. } => message,
        }
    }

    /// The driver error every JDBC leaf wraps.
    #[must_use]
    pub const fn driver(&self) -> &DriverError {
        match self {
            Self::Generic { driver, .. }
            | Self::SqlGrammar { driver, .. }
            | Self::ConstraintViolation { driver, .. }
            | Self::Data { driver, .. }
            | Self::Connection { driver, .. }
            | Self::QueryTimeout { driver, .. } => driver,
        }
    }

    /// The cause is chained beneath the driver error.
    pub(crate) fn set_cause(&mut self, cause: Cause) {
        match self {
            Self::Generic { driver, .. }
            | Self::SqlGrammar { driver, .. }
            | Self::ConstraintViolation { driver, .. }
            | Self::Data { driver, .. }
            | Self::Connection { driver, .. }
            | Self::QueryTimeout { driver, .. } => driver.set_cause(cause),
        }
    }

    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Generic { sql, .. }
            | Self::SqlGrammar { sql, .. }
            | Self::ConstraintViolation { sql, .. }
            | Self::Data { sql, .. }
            | Self::Connection { sql, .. }
            | Self::QueryTimeout { sql, .. } => sql.as_deref(),
        }
    }

    #[must_use]
    pub fn constraint_name(&self) -> Option<&str> {
        match self {
            Self::ConstraintViolation {
                constraint_name, ..
            } => constraint_name.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LockError {
    /// The database could not grant a lock (deadlock, serialization failure).
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    LockAcquisition {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// A pessimistic lock request was refused.
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    PessimisticLock {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// Waiting for a lock exceeded the lock timeout.
    #[error("{message}{}", statement_fragment(.driver, .sql.as_deref()))]
    LockTimeout {
        message: String,
        sql: Option<String>,
        #[source]
        driver: DriverError,
    },

    /// A version or row-count check failed.
    #[error("{message}")]
    StaleState {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A specific instance was updated or deleted by another transaction.
    #[error("{message}: {}", info_string(Some(.entity_name.as_str()), Some(.identifier)))]
    StaleObjectState {
        message: String,
        entity_name: String,
        identifier: Identifier,
        #[source]
        cause: Option<Cause>,
    },

    /// An optimistic lock check on an entity failed.
    #[error(
        "{message}: {} (lock mode: {lock_mode})",
        info_string(Some(.entity_name.as_str()), .identifier.as_ref())
    )]
    OptimisticEntityLock {
        message: String,
        entity_name: String,
        identifier: Option<Identifier>,
        lock_mode: LockMode,
        #[source]
        cause: Option<Cause>,
    },
}

impl LockError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::LockAcquisition { .. } => ErrorKind::LockAcquisition,
            Self::PessimisticLock { .. } => ErrorKind::PessimisticLock,
            Self::LockTimeout { .. } => ErrorKind::LockTimeout,
            Self::StaleState { .. } => ErrorKind::StaleState,
            Self::StaleObjectState { .. } => ErrorKind::StaleObjectState,
            Self::OptimisticEntityLock { .. } => ErrorKind::OptimisticEntityLock,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::LockAcquisition { message, .. }
            | Self::PessimisticLock { message, .. }
            | Self::LockTimeout { message, .. }
            | Self::StaleState { message, .. }
            | Self::StaleObjectState { message, .. }
            | Self::OptimisticEntityLock { message, .. } => message,
        }
    }

    /// The driver error, for statement-level lock failures.
    #[must_use]
    pub const fn driver(&self) -> Option<&DriverError> {
        match self {
            Self::LockAcquisition { driver, .. }
            | Self::PessimisticLock { driver, .. }
            | Self::LockTimeout { driver, .. } => Some(driver),
            Self::StaleState { .. }
            | Self::StaleObjectState { .. }
            | Self::OptimisticEntityLock { .. } => None,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::LockAcquisition { driver, .. }
            | Self::PessimisticLock { driver, .. }
            | Self::LockTimeout { driver, .. } => driver.set_cause(new_cause),
            Self::StaleState { cause, .. }
            | Self::StaleObjectState { cause, .. }
            | Self::OptimisticEntityLock { cause, .. } => *cause = Some(new_cause),
        }
    }

    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::LockAcquisition { sql, .. }
            | Self::PessimisticLock { sql, .. }
            | Self::LockTimeout { sql, .. } => sql.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn entity_name(&self) -> Option<&str> {
        match self {
            Self::StaleObjectState { entity_name, .. }
            | Self::OptimisticEntityLock { entity_name, .. } => Some(entity_name.as_str()),
            _ => None,
        }
    }

    pub(crate) const fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::StaleObjectState { identifier, .. } => Some(identifier),
            Self::OptimisticEntityLock { identifier, .. } => identifier.as_ref(),
            _ => None,
        }
    }
}

impl OrmError {
    pub fn generic_jdbc(driver: DriverError, sql: Option<String>) -> Self {
        JdbcError::Generic {
            message: "could not execute statement".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn sql_grammar(driver: DriverError, sql: Option<String>) -> Self {
        JdbcError::SqlGrammar {
            message: "could not prepare statement".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn constraint_violation(
        driver: DriverError,
        sql: Option<String>,
        constraint_kind: ConstraintKind,
        constraint_name: Option<String>,
    ) -> Self {
        JdbcError::ConstraintViolation {
            message: "could not execute statement; constraint violated".to_string(),
            sql,
            driver,
            constraint_name,
            constraint_kind,
        }
        .into()
    }

    pub fn data_error(driver: DriverError, sql: Option<String>) -> Self {
        JdbcError::Data {
            message: "could not convert value".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn jdbc_connection(driver: DriverError, sql: Option<String>) -> Self {
        JdbcError::Connection {
            message: "unable to obtain JDBC connection".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn query_timeout(driver: DriverError, sql: Option<String>) -> Self {
        JdbcError::QueryTimeout {
            message: "query timed out".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn lock_acquisition(driver: DriverError, sql: Option<String>) -> Self {
        LockError::LockAcquisition {
            message: "could not acquire lock".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn pessimistic_lock(driver: DriverError, sql: Option<String>) -> Self {
        LockError::PessimisticLock {
            message: "could not obtain pessimistic lock".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn lock_timeout(driver: DriverError, sql: Option<String>) -> Self {
        LockError::LockTimeout {
            message: "lock wait timed out".to_string(),
            sql,
            driver,
        }
        .into()
    }

    pub fn stale_state(message: impl Into<String>) -> Self {
        LockError::StaleState {
            message: message.into(),
            cause: None,
        }
        .into()
    }

    pub fn stale_object_state(entity_name: impl Into<String>, identifier: impl Into<Identifier>) -> Self {
        LockError::StaleObjectState {
            message: "Row was updated or deleted by another transaction".to_string(),
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            cause: None,
        }
        .into()
    }

    pub fn optimistic_entity_lock(
        entity_name: impl Into<String>,
        identifier: Option<Identifier>,
        lock_mode: LockMode,
    ) -> Self {
        LockError::OptimisticEntityLock {
            message: "Newer version of entity in database".to_string(),
            entity_name: entity_name.into(),
            identifier,
            lock_mode,
            cause: None,
        }
        .into()
    }
}
