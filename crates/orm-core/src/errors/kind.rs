//! Flat discriminators over the taxonomy: leaf kind, category, and fault.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Concern a failure belongs to. Every leaf has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Configuration,
    Mapping,
    Jdbc,
    Lock,
    Session,
    Identity,
    Usage,
    Transaction,
    Query,
    Property,
    Internal,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Mapping => "mapping",
            Self::Jdbc => "jdbc",
            Self::Lock => "lock",
            Self::Session => "session",
            Self::Identity => "identity",
            Self::Usage => "usage",
            Self::Transaction => "transaction",
            Self::Query => "query",
            Self::Property => "property",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Fault
// ---------------------------------------------------------------------------

/// Who is at fault for a failure.
///
/// A catch-all handler may hide `Usage` failures from end users, but must
/// always surface `Internal` ones to logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    /// The caller misused the API (wrong lifecycle state, unknown name, ...).
    Usage,
    /// The database, mapping, or configuration the framework was given.
    Environment,
    /// A framework bug.
    Internal,
}

impl Fault {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Environment => "environment",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Leaf discriminator of an [`OrmError`](crate::errors::OrmError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidConfiguration,
    UnknownProfile,
    UnknownFilter,
    Instantiation,
    Mapping,
    DuplicateMapping,
    MappingNotFound,
    PropertyNotFound,
    UnknownEntityType,
    GenericJdbc,
    SqlGrammar,
    ConstraintViolation,
    DataError,
    JdbcConnection,
    QueryTimeout,
    LockAcquisition,
    PessimisticLock,
    LockTimeout,
    StaleState,
    StaleObjectState,
    OptimisticEntityLock,
    Session,
    ResourceClosed,
    LazyInitialization,
    ObjectNotFound,
    ObjectDeleted,
    WrongClass,
    NonUniqueObject,
    EntityFiltered,
    TransientObject,
    TransientPropertyValue,
    PersistentObject,
    Transaction,
    TransactionRequired,
    RollbackOnly,
    Query,
    NonUniqueResult,
    QueryParameter,
    PropertyAccess,
    PropertyValue,
    AssertionFailure,
}

impl ErrorKind {
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn category(self) -> Category {
        match self {
            Self::InvalidConfiguration
            | Self::UnknownProfile
            | Self::UnknownFilter
            | Self::Instantiation => Category::Configuration,
            Self::Mapping
            | Self::DuplicateMapping
            | Self::MappingNotFound
            | Self::PropertyNotFound
            | Self::UnknownEntityType => Category::Mapping,
            Self::GenericJdbc
            | Self::SqlGrammar
            | Self::ConstraintViolation
            | Self::DataError
            | Self::JdbcConnection
            | Self::QueryTimeout => Category::Jdbc,
            Self::LockAcquisition
            | Self::PessimisticLock
            | Self::LockTimeout
            | Self::StaleState
            | Self::StaleObjectState
            | Self::OptimisticEntityLock => Category::Lock,
            Self::Session | Self::ResourceClosed | Self::LazyInitialization => Category::Session,
            Self::ObjectNotFound
            | Self::ObjectDeleted
            | Self::WrongClass
            | Self::NonUniqueObject
            | Self::EntityFiltered => Category::Identity,
            Self::TransientObject | Self::TransientPropertyValue | Self::PersistentObject => {
                Category::Usage
            }
            Self::Transaction | Self::TransactionRequired | Self::RollbackOnly => {
                Category::Transaction
            }
            Self::Query | Self::NonUniqueResult | Self::QueryParameter => Category::Query,
            Self::PropertyAccess | Self::PropertyValue => Category::Property,
            Self::AssertionFailure => Category::Internal,
        }
    }

    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn fault(self) -> Fault {
        match self {
            Self::AssertionFailure => Fault::Internal,
            Self::TransientObject
            | Self::TransientPropertyValue
            | Self::PersistentObject
            | Self::NonUniqueObject
            | Self::ObjectDeleted
            | Self::ResourceClosed
            | Self::TransactionRequired
            | Self::QueryParameter
            | Self::UnknownProfile
            | Self::UnknownFilter => Fault::Usage,
            _ => Fault::Environment,
        }
    }

    /// Whether a caller may catch this kind and retry with different
    /// semantics. Every other kind abandons the unit of work.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::NonUniqueResult)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidConfiguration => "invalid_configuration",
            Self::UnknownProfile => "unknown_profile",
            Self::UnknownFilter => "unknown_filter",
            Self::Instantiation => "instantiation",
            Self::Mapping => "mapping",
            Self::DuplicateMapping => "duplicate_mapping",
            Self::MappingNotFound => "mapping_not_found",
            Self::PropertyNotFound => "property_not_found",
            Self::UnknownEntityType => "unknown_entity_type",
            Self::GenericJdbc => "generic_jdbc",
            Self::SqlGrammar => "sql_grammar",
            Self::ConstraintViolation => "constraint_violation",
            Self::DataError => "data_error",
            Self::JdbcConnection => "jdbc_connection",
            Self::QueryTimeout => "query_timeout",
            Self::LockAcquisition => "lock_acquisition",
            Self::PessimisticLock => "pessimistic_lock",
            Self::LockTimeout => "lock_timeout",
            Self::StaleState => "stale_state",
            Self::StaleObjectState => "stale_object_state",
            Self::OptimisticEntityLock => "optimistic_entity_lock",
            Self::Session => "session",
            Self::ResourceClosed => "resource_closed",
            Self::LazyInitialization => "lazy_initialization",
            Self::ObjectNotFound => "object_not_found",
            Self::ObjectDeleted => "object_deleted",
            Self::WrongClass => "wrong_class",
            Self::NonUniqueObject => "non_unique_object",
            Self::EntityFiltered => "entity_filtered",
            Self::TransientObject => "transient_object",
            Self::TransientPropertyValue => "transient_property_value",
            Self::PersistentObject => "persistent_object",
            Self::Transaction => "transaction",
            Self::TransactionRequired => "transaction_required",
            Self::RollbackOnly => "rollback_only",
            Self::Query => "query",
            Self::NonUniqueResult => "non_unique_result",
            Self::QueryParameter => "query_parameter",
            Self::PropertyAccess => "property_access",
            Self::PropertyValue => "property_value",
            Self::AssertionFailure => "assertion_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_unique_result_is_recoverable() {
        assert!(ErrorKind::NonUniqueResult.is_recoverable());
        assert!(!ErrorKind::NonUniqueObject.is_recoverable());
        assert!(!ErrorKind::StaleObjectState.is_recoverable());
    }

    #[test]
    fn assertion_failure_is_the_only_internal_fault() {
        assert_eq!(ErrorKind::AssertionFailure.fault(), Fault::Internal);
        assert_eq!(ErrorKind::AssertionFailure.category(), Category::Internal);
        assert_eq!(ErrorKind::TransientObject.fault(), Fault::Usage);
        assert_eq!(ErrorKind::GenericJdbc.fault(), Fault::Environment);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ErrorKind::TransientPropertyValue).unwrap();
        assert_eq!(json, "\"transient_property_value\"");
        let back: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorKind::TransientPropertyValue);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", ErrorKind::SqlGrammar), "sql_grammar");
        assert_eq!(format!("{}", Category::Jdbc), "jdbc");
        assert_eq!(format!("{}", Fault::Environment), "environment");
    }
}
