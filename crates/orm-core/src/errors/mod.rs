//! Failure taxonomy for the persistence layer.
//!
//! [`OrmError`] is the root every failure converts into. Each variant wraps
//! one category enum, and each category enum's variants are the leaves. A
//! catch site discriminates by matching the category variant (or comparing
//! [`OrmError::category`]), never by inspecting message text.
//!
//! Every leaf holds a base `message` plus its own context fields. `Display`
//! renders the base message and then appends the context fragments, so a
//! handler that only knows the root still logs the full context. The base
//! message defaults to a canonical text per leaf and can be overridden once
//! with [`OrmError::with_message`]. Any leaf can carry a cause, attached with
//! [`OrmError::with_cause`] and exposed through `source()`.
//!
//! None of these failures is retried automatically. The only one a caller
//! may recover from is [`ErrorKind::NonUniqueResult`]; every other leaf means
//! the unit of work that raised it must be discarded.

mod configuration;
mod context;
mod jdbc;
mod kind;
mod mapping;
mod property;
mod query;
mod state;
mod transaction;

pub use configuration::ConfigurationError;
pub use context::{Cause, DriverError, Identifier};
pub use jdbc::{ConstraintKind, JdbcError, LockError};
pub use kind::{Category, ErrorKind, Fault};
pub use mapping::{DuplicateKind, MappingError};
pub use property::{AccessDirection, PropertyError};
pub use query::QueryError;
pub use state::{IdentityError, SessionError, UsageError};
pub use transaction::TransactionError;

use std::fmt::Write as _;
use thiserror::Error;

/// Failures that indicate a framework bug rather than misuse or environment.
#[derive(Debug, Error)]
pub enum InternalError {
    /// An internal invariant did not hold.
    #[error("{message}")]
    AssertionFailure {
        message: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl InternalError {
    fn message_mut(&mut self) -> &mut String {
        match self {
            Self::AssertionFailure { message, .. } => message,
        }
    }

    fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::AssertionFailure { cause, .. } => *cause = Some(new_cause),
        }
    }
}

/// Root of the taxonomy.
#[derive(Debug, Error)]
pub enum OrmError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Jdbc(#[from] JdbcError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl OrmError {
    /// Report a broken internal invariant.
    ///
    /// Logged at `error` when constructed: these are framework bugs and must
    /// reach the logs even if a boundary later hides the failure.
    pub fn assertion_failure(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(%message, "an assertion failure occurred (this may indicate a framework bug)");
        InternalError::AssertionFailure {
            message,
            cause: None,
        }
        .into()
    }

    /// Replace the leaf's base message, keeping every context field.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        *self.message_mut() = message.into();
        self
    }

    /// Attach the failure that led to this one, replacing any earlier cause.
    ///
    /// Database-call leaves chain it beneath their driver error, so the
    /// source chain reads leaf, driver, cause.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.set_cause(Box::new(cause));
        self
    }

    fn message_mut(&mut self) -> &mut String {
        match self {
            Self::Configuration(e) => e.message_mut(),
            Self::Mapping(e) => e.message_mut(),
            Self::Jdbc(e) => e.message_mut(),
            Self::Lock(e) => e.message_mut(),
            Self::Session(e) => e.message_mut(),
            Self::Identity(e) => e.message_mut(),
            Self::Usage(e) => e.message_mut(),
            Self::Transaction(e) => e.message_mut(),
            Self::Query(e) => e.message_mut(),
            Self::Property(e) => e.message_mut(),
            Self::Internal(e) => e.message_mut(),
        }
    }

    fn set_cause(&mut self, cause: Cause) {
        match self {
            Self::Configuration(e) => e.set_cause(cause),
            Self::Mapping(e) => e.set_cause(cause),
            Self::Jdbc(e) => e.set_cause(cause),
            Self::Lock(e) => e.set_cause(cause),
            Self::Session(e) => e.set_cause(cause),
            Self::Identity(e) => e.set_cause(cause),
            Self::Usage(e) => e.set_cause(cause),
            Self::Transaction(e) => e.set_cause(cause),
            Self::Query(e) => e.set_cause(cause),
            Self::Property(e) => e.set_cause(cause),
            Self::Internal(e) => e.set_cause(cause),
        }
    }

    /// The leaf discriminator.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(e) => e.kind(),
            Self::Mapping(e) => e.kind(),
            Self::Jdbc(e) => e.kind(),
            Self::Lock(e) => e.kind(),
            Self::Session(e) => e.kind(),
            Self::Identity(e) => e.kind(),
            Self::Usage(e) => e.kind(),
            Self::Transaction(e) => e.kind(),
            Self::Query(e) => e.kind(),
            Self::Property(e) => e.kind(),
            Self::Internal(InternalError::AssertionFailure { .. }) => ErrorKind::AssertionFailure,
        }
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Configuration(_) => Category::Configuration,
            Self::Mapping(_) => Category::Mapping,
            Self::Jdbc(_) => Category::Jdbc,
            Self::Lock(_) => Category::Lock,
            Self::Session(_) => Category::Session,
            Self::Identity(_) => Category::Identity,
            Self::Usage(_) => Category::Usage,
            Self::Transaction(_) => Category::Transaction,
            Self::Query(_) => Category::Query,
            Self::Property(_) => Category::Property,
            Self::Internal(_) => Category::Internal,
        }
    }

    #[must_use]
    pub fn is_category(&self, category: Category) -> bool {
        self.category() == category
    }

    #[must_use]
    pub const fn fault(&self) -> Fault {
        self.kind().fault()
    }

    /// Whether this failure signals a framework bug.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.fault(), Fault::Internal)
    }

    /// Whether the caller may catch this and retry with different semantics.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }

    /// The composed message followed by every cause in the source chain.
    ///
    /// A cause whose text already appears (the driver message embedded by
    /// database-call leaves) is not repeated.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !out.contains(&text) {
                let _ = write!(out, "; caused by: {text}");
            }
            source = cause.source();
        }
        out
    }

    #[must_use]
    pub fn entity_name(&self) -> Option<&str> {
        match self {
            Self::Mapping(e) => e.entity_name(),
            Self::Lock(e) => e.entity_name(),
            Self::Identity(e) => Some(e.entity_name()),
            Self::Usage(e) => e.entity_name(),
            Self::Property(e) => Some(e.entity_name()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Lock(e) => e.identifier(),
            Self::Identity(e) => Some(e.identifier()),
            _ => None,
        }
    }

    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::Mapping(e) => e.property_name(),
            Self::Usage(e) => e.property_name(),
            Self::Property(e) => Some(e.property_name()),
            _ => None,
        }
    }

    /// SQL text of the failed statement, for database-call failures.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Jdbc(e) => e.sql(),
            Self::Lock(e) => e.sql(),
            _ => None,
        }
    }

    /// The driver error wrapped by database-call failures.
    #[must_use]
    pub const fn driver_error(&self) -> Option<&DriverError> {
        match self {
            Self::Jdbc(e) => Some(e.driver()),
            Self::Lock(e) => e.driver(),
            _ => None,
        }
    }

    #[must_use]
    pub fn sql_state(&self) -> Option<&str> {
        self.driver_error()
            .and_then(|driver| driver.sql_state.as_deref())
    }

    #[must_use]
    pub fn vendor_code(&self) -> Option<i32> {
        self.driver_error().and_then(|driver| driver.vendor_code)
    }

    #[must_use]
    pub fn constraint_name(&self) -> Option<&str> {
        match self {
            Self::Jdbc(e) => e.constraint_name(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn with_message_keeps_context() {
        let err = OrmError::object_not_found(1, "Order").with_message("Order vanished");
        assert_eq!(err.to_string(), "Order vanished: [Order#1]");
        assert_eq!(err.entity_name(), Some("Order"));
    }

    #[test]
    fn lazy_initialization_keeps_cause() {
        let err = OrmError::lazy_initialization("could not initialize proxy")
            .with_cause(std::io::Error::other("session closed underneath"));
        assert_eq!(
            err.describe(),
            "could not initialize proxy; caused by: session closed underneath"
        );
    }

    #[test]
    fn with_cause_replaces_earlier_cause() {
        let err = OrmError::stale_state("row count mismatch")
            .with_cause(std::io::Error::other("first"))
            .with_cause(std::io::Error::other("second"));
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("second".to_string())
        );
    }

    #[test]
    fn describe_does_not_repeat_driver_text() {
        let err = OrmError::sql_grammar(
            DriverError::new("syntax error at or near \"form\""),
            Some("select * form orders".to_string()),
        );
        assert_eq!(
            err.describe(),
            "could not prepare statement [syntax error at or near \"form\"] [select * form orders]"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn describe_follows_driver_cause() {
        let driver = DriverError::new("connection refused")
            .with_cause(std::io::Error::other("tcp connect to db:5432 failed"));
        let err = OrmError::jdbc_connection(driver, None);
        assert_eq!(
            err.describe(),
            "unable to obtain JDBC connection [connection refused]; caused by: tcp connect to db:5432 failed"
        );
    }

    #[test]
    fn describe_walks_nested_causes() {
        let inner = OrmError::invalid_configuration("bad url");
        let err = OrmError::instantiation("PooledConnectionProvider").with_cause(inner);
        assert_eq!(
            err.describe(),
            "Could not instantiate [PooledConnectionProvider]; caused by: bad url"
        );
    }

    #[test]
    fn assertion_failure_is_internal() {
        let err = OrmError::assertion_failure("entry already in persistence context");
        assert!(err.is_internal());
        assert_eq!(err.kind(), ErrorKind::AssertionFailure);
        assert_eq!(err.category(), Category::Internal);
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<OrmError>();
    }
}
