//! Context values carried by taxonomy leaves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Boxed cause attached to a leaf with [`OrmError::with_cause`](super::OrmError::with_cause).
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Placeholder rendered for an absent entity name.
pub(crate) const UNKNOWN: &str = "<unknown>";

/// Placeholder rendered for an absent identifier.
pub(crate) const NULL: &str = "<null>";

/// Primary-key or natural-key value of an entity instance.
///
/// Opaque to the taxonomy: compared for equality and rendered for messages,
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Text(String),
    Composite(Vec<Identifier>),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Composite(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Identifier {
    fn from(parts: Vec<Self>) -> Self {
        Self::Composite(parts)
    }
}

/// Failure reported by the database driver, as handed to the taxonomy.
///
/// Equality compares the reported message, SQLSTATE, and vendor code; the
/// underlying cause is not part of it.
#[derive(Debug, Clone, Error)]
#[error("{message}{}{}", state_suffix(.sql_state.as_deref()), code_suffix(.vendor_code.as_ref()))]
pub struct DriverError {
    pub message: String,
    pub sql_state: Option<String>,
    pub vendor_code: Option<i32>,
    #[source]
    cause: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

impl PartialEq for DriverError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.sql_state == other.sql_state
            && self.vendor_code == other.vendor_code
    }
}

impl Eq for DriverError {}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sql_state: None,
            vendor_code: None,
            cause: None,
        }
    }

    /// Record what made the driver fail (socket, TLS, protocol).
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    pub(crate) fn set_cause(&mut self, cause: Cause) {
        self.cause = Some(Arc::from(cause));
    }

    #[must_use]
    pub fn with_sql_state(mut self, sql_state: impl Into<String>) -> Self {
        self.sql_state = Some(sql_state.into());
        self
    }

    #[must_use]
    pub const fn with_vendor_code(mut self, vendor_code: i32) -> Self {
        self.vendor_code = Some(vendor_code);
        self
    }

    /// The two-character SQLSTATE class, e.g. `23` for `23505`.
    #[must_use]
    pub fn sql_state_class(&self) -> Option<&str> {
        self.sql_state
            .as_deref()
            .filter(|state| state.len() >= 2)
            .and_then(|state| state.get(..2))
    }
}

fn state_suffix(sql_state: Option<&str>) -> String {
    sql_state.map_or_else(String::new, |state| format!(" [SQLState: {state}]"))
}

fn code_suffix(vendor_code: Option<&i32>) -> String {
    vendor_code.map_or_else(String::new, |code| format!(" [ErrorCode: {code}]"))
}

/// Render `[Entity#id]`, degrading absent parts to placeholders.
pub(crate) fn info_string(entity_name: Option<&str>, identifier: Option<&Identifier>) -> String {
    let entity = entity_name.unwrap_or(UNKNOWN);
    match identifier {
        Some(id) => format!("[{entity}#{id}]"),
        None => format!("[{entity}#{NULL}]"),
    }
}

/// Render `Owner.property`.
pub(crate) fn qualify(owner: &str, property: &str) -> String {
    if owner.is_empty() {
        property.to_string()
    } else {
        format!("{owner}.{property}")
    }
}

/// Render ` [text]` when present, nothing otherwise.
pub(crate) fn bracketed(text: Option<&str>) -> String {
    text.map_or_else(String::new, |text| format!(" [{text}]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifier_display() {
        assert_eq!(Identifier::from(42).to_string(), "42");
        assert_eq!(Identifier::from("ORD-7").to_string(), "ORD-7");
        let composite = Identifier::from(vec![Identifier::from(1), Identifier::from("eu")]);
        assert_eq!(composite.to_string(), "(1, eu)");
    }

    #[test]
    fn identifier_serde_is_untagged() {
        let json = serde_json::to_string(&Identifier::from(vec![
            Identifier::from(7_i64),
            Identifier::from("x"),
        ]))
        .unwrap();
        assert_eq!(json, r#"[7,"x"]"#);
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Identifier::from(vec![Identifier::from(7), Identifier::from("x")]));
    }

    #[test]
    fn driver_error_display_includes_state_and_code() {
        let driver = DriverError::new("duplicate key")
            .with_sql_state("23505")
            .with_vendor_code(1062);
        assert_eq!(
            driver.to_string(),
            "duplicate key [SQLState: 23505] [ErrorCode: 1062]"
        );
        assert_eq!(driver.sql_state_class(), Some("23"));
    }

    #[test]
    fn driver_error_without_state_has_no_class() {
        let driver = DriverError::new("boom").with_sql_state("2");
        assert_eq!(driver.sql_state_class(), None);
        assert_eq!(DriverError::new("boom").to_string(), "boom");
    }

    #[test]
    fn driver_error_equality_ignores_cause() {
        let plain = DriverError::new("reset").with_sql_state("08006");
        let caused = plain.clone().with_cause(std::io::Error::other("broken pipe"));
        assert_eq!(plain, caused);
        assert_eq!(
            std::error::Error::source(&caused).map(ToString::to_string),
            Some("broken pipe".to_string())
        );
        assert!(std::error::Error::source(&plain).is_none());
    }

    #[test]
    fn info_string_degrades_missing_parts() {
        assert_eq!(info_string(Some("Order"), Some(&Identifier::from(1))), "[Order#1]");
        assert_eq!(info_string(None, None), "[<unknown>#<null>]");
    }

    #[test]
    fn qualify_skips_empty_owner() {
        assert_eq!(qualify("Order", "total"), "Order.total");
        assert_eq!(qualify("", "total"), "total");
    }
}
