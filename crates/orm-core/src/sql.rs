//! Classification of driver failures into taxonomy leaves.
//!
//! A [`SqlExceptionConverter`] inspects the SQLSTATE and vendor code of a
//! [`DriverError`] and either claims it by returning a leaf or passes by
//! returning `None`. [`ConverterChain`] asks dialect converters first, then
//! the [`StandardSqlStateConverter`], and falls back to a generic JDBC leaf
//! so every driver failure ends up classified.

use crate::errors::{ConstraintKind, DriverError, OrmError};

/// Turns a driver failure into a taxonomy leaf, or declines.
pub trait SqlExceptionConverter: Send + Sync {
    /// `message` replaces the leaf's base message when non-empty; `sql` is
    /// the statement that failed, when known.
    fn convert(&self, message: &str, driver: &DriverError, sql: Option<&str>) -> Option<OrmError>;
}

/// Leaf chosen by a converter, before the error value is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classified {
    Grammar,
    Constraint(ConstraintKind),
    Data,
    Connection,
    QueryTimeout,
    LockAcquisition,
    PessimisticLock,
    LockTimeout,
}

impl Classified {
    fn build(self, message: &str, driver: &DriverError, sql: Option<&str>) -> OrmError {
        let driver = driver.clone();
        let sql = sql.map(str::to_string);
        let err = match self {
            Self::Grammar => OrmError::sql_grammar(driver, sql),
            Self::Constraint(kind) => {
                let name = constraint_name(&driver.message);
                OrmError::constraint_violation(driver, sql, kind, name)
            }
            Self::Data => OrmError::data_error(driver, sql),
            Self::Connection => OrmError::jdbc_connection(driver, sql),
            Self::QueryTimeout => OrmError::query_timeout(driver, sql),
            Self::LockAcquisition => OrmError::lock_acquisition(driver, sql),
            Self::PessimisticLock => OrmError::pessimistic_lock(driver, sql),
            Self::LockTimeout => OrmError::lock_timeout(driver, sql),
        };
        with_context_message(err, message)
    }
}

fn with_context_message(err: OrmError, message: &str) -> OrmError {
    if message.trim().is_empty() {
        err
    } else {
        err.with_message(message)
    }
}

/// Pull a constraint name out of common driver message shapes:
/// `... constraint "orders_pk"` and `... for key 'orders.uk_email'`.
fn constraint_name(driver_message: &str) -> Option<String> {
    let quoted_after = |marker: &str, quote: char| {
        let start = driver_message.find(marker)? + marker.len();
        let rest = &driver_message[start..];
        let end = rest.find(quote)?;
        Some(rest[..end].to_string()).filter(|name| !name.is_empty())
    };
    quoted_after("constraint \"", '"').or_else(|| quoted_after("for key '", '\''))
}

// ---------------------------------------------------------------------------
// Standard SQLSTATE classes
// ---------------------------------------------------------------------------

/// Classifies by the standard SQLSTATE class alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSqlStateConverter;

impl StandardSqlStateConverter {
    fn classify(driver: &DriverError) -> Option<Classified> {
        let state = driver.sql_state.as_deref()?;
        match state {
            "40001" | "40XL1" | "40XL2" => return Some(Classified::LockAcquisition),
            "70100" => return Some(Classified::QueryTimeout),
            _ => {}
        }
        match driver.sql_state_class()? {
            "23" => Some(Classified::Constraint(ConstraintKind::Other)),
            "22" => Some(Classified::Data),
            "08" => Some(Classified::Connection),
            "42" | "37" | "07" => Some(Classified::Grammar),
            _ => None,
        }
    }
}

impl SqlExceptionConverter for StandardSqlStateConverter {
    fn convert(&self, message: &str, driver: &DriverError, sql: Option<&str>) -> Option<OrmError> {
        Self::classify(driver).map(|classified| classified.build(message, driver, sql))
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresConverter;

impl PostgresConverter {
    fn classify(driver: &DriverError) -> Option<Classified> {
        match driver.sql_state.as_deref()? {
            "40P01" => Some(Classified::LockAcquisition),
            "55P03" => Some(Classified::PessimisticLock),
            "57014" => Some(Classified::QueryTimeout),
            "23505" => Some(Classified::Constraint(ConstraintKind::Unique)),
            "23503" => Some(Classified::Constraint(ConstraintKind::ForeignKey)),
            "23502" => Some(Classified::Constraint(ConstraintKind::NotNull)),
            "23514" => Some(Classified::Constraint(ConstraintKind::Check)),
            _ => None,
        }
    }
}

impl SqlExceptionConverter for PostgresConverter {
    fn convert(&self, message: &str, driver: &DriverError, sql: Option<&str>) -> Option<OrmError> {
        Self::classify(driver).map(|classified| classified.build(message, driver, sql))
    }
}

// ---------------------------------------------------------------------------
// MySQL
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConverter;

impl MySqlConverter {
    fn classify(driver: &DriverError) -> Option<Classified> {
        let by_code = match driver.vendor_code {
            Some(1205 | 3572) => Some(Classified::PessimisticLock),
            Some(1206 | 1207) => Some(Classified::LockAcquisition),
            Some(1062) => Some(Classified::Constraint(ConstraintKind::Unique)),
            _ => None,
        };
        by_code.or_else(|| match driver.sql_state.as_deref()? {
            "41000" => Some(Classified::LockTimeout),
            "40001" => Some(Classified::LockAcquisition),
            _ => None,
        })
    }
}

impl SqlExceptionConverter for MySqlConverter {
    fn convert(&self, message: &str, driver: &DriverError, sql: Option<&str>) -> Option<OrmError> {
        Self::classify(driver).map(|classified| classified.build(message, driver, sql))
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Dialect converters in order, then the standard SQLSTATE rules, then the
/// generic fallback.
pub struct ConverterChain {
    delegates: Vec<Box<dyn SqlExceptionConverter>>,
    standard: StandardSqlStateConverter,
}

impl ConverterChain {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delegates: Vec::new(),
            standard: StandardSqlStateConverter,
        }
    }

    /// Append a dialect converter; earlier delegates win.
    #[must_use]
    pub fn with_delegate(mut self, delegate: impl SqlExceptionConverter + 'static) -> Self {
        self.delegates.push(Box::new(delegate));
        self
    }

    #[must_use]
    pub fn postgres() -> Self {
        Self::new().with_delegate(PostgresConverter)
    }

    #[must_use]
    pub fn mysql() -> Self {
        Self::new().with_delegate(MySqlConverter)
    }

    /// Classify a driver failure. Always yields a leaf.
    pub fn convert(&self, message: &str, driver: DriverError, sql: Option<String>) -> OrmError {
        let converted = self
            .delegates
            .iter()
            .find_map(|delegate| delegate.convert(message, &driver, sql.as_deref()))
            .or_else(|| self.standard.convert(message, &driver, sql.as_deref()));

        let err = converted.unwrap_or_else(|| {
            with_context_message(OrmError::generic_jdbc(driver, sql), message)
        });
        tracing::debug!(
            kind = %err.kind(),
            sql_state = err.sql_state(),
            vendor_code = err.vendor_code(),
            "converted driver error"
        );
        err
    }
}

impl Default for ConverterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConverterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterChain")
            .field("delegates", &self.delegates.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn state(code: &str) -> DriverError {
        DriverError::new("driver failure").with_sql_state(code)
    }

    #[rstest]
    #[case("23000", ErrorKind::ConstraintViolation)]
    #[case("22001", ErrorKind::DataError)]
    #[case("08006", ErrorKind::JdbcConnection)]
    #[case("42P01", ErrorKind::SqlGrammar)]
    #[case("37000", ErrorKind::SqlGrammar)]
    #[case("07001", ErrorKind::SqlGrammar)]
    #[case("40001", ErrorKind::LockAcquisition)]
    #[case("40XL1", ErrorKind::LockAcquisition)]
    #[case("70100", ErrorKind::QueryTimeout)]
    #[case("HY000", ErrorKind::GenericJdbc)]
    fn standard_classes(#[case] sql_state: &str, #[case] expected: ErrorKind) {
        let err = ConverterChain::new().convert("", state(sql_state), None);
        assert_eq!(err.kind(), expected);
    }

    #[rstest]
    #[case("40P01", ErrorKind::LockAcquisition)]
    #[case("55P03", ErrorKind::PessimisticLock)]
    #[case("57014", ErrorKind::QueryTimeout)]
    fn postgres_states(#[case] sql_state: &str, #[case] expected: ErrorKind) {
        let err = ConverterChain::postgres().convert("", state(sql_state), None);
        assert_eq!(err.kind(), expected);
    }

    #[test]
    fn postgres_unique_violation_names_constraint() {
        let driver = DriverError::new(
            "duplicate key value violates unique constraint \"orders_pk\"",
        )
        .with_sql_state("23505");
        let err = ConverterChain::postgres().convert(
            "could not insert",
            driver,
            Some("insert into orders (id) values (?)".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(err.constraint_name(), Some("orders_pk"));
        assert!(err.to_string().starts_with("could not insert ["));
        assert!(err.to_string().ends_with("[constraint orders_pk (unique)]"));
    }

    #[rstest]
    #[case(1205, ErrorKind::PessimisticLock)]
    #[case(3572, ErrorKind::PessimisticLock)]
    #[case(1207, ErrorKind::LockAcquisition)]
    #[case(1062, ErrorKind::ConstraintViolation)]
    fn mysql_vendor_codes(#[case] code: i32, #[case] expected: ErrorKind) {
        let driver = DriverError::new("mysql failure").with_vendor_code(code);
        let err = ConverterChain::mysql().convert("", driver, None);
        assert_eq!(err.kind(), expected);
        assert_eq!(err.vendor_code(), Some(code));
    }

    #[test]
    fn mysql_lock_timeout_state() {
        let err = ConverterChain::mysql().convert("", state("41000"), None);
        assert_eq!(err.kind(), ErrorKind::LockTimeout);
    }

    #[test]
    fn mysql_duplicate_key_name() {
        let driver = DriverError::new("Duplicate entry 'a@b' for key 'users.uk_email'")
            .with_vendor_code(1062)
            .with_sql_state("23000");
        let err = ConverterChain::mysql().convert("", driver, None);
        assert_eq!(err.constraint_name(), Some("users.uk_email"));
    }

    #[test]
    fn unclassified_falls_back_to_generic() {
        let err = ConverterChain::postgres().convert(
            "could not load",
            DriverError::new("io failure"),
            Some("select 1".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::GenericJdbc);
        assert_eq!(err.to_string(), "could not load [io failure] [select 1]");
    }

    #[test]
    fn dialect_converters_decline_unknown_states() {
        assert!(PostgresConverter.convert("", &state("23000"), None).is_none());
        assert!(MySqlConverter.convert("", &state("22001"), None).is_none());
        assert!(StandardSqlStateConverter.convert("", &DriverError::new("x"), None).is_none());
    }
}
