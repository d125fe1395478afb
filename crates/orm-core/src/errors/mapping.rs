//! Mapping metadata failures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::context::{Cause, qualify};
use super::{ErrorKind, OrmError};

/// What kind of definition was declared twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    Entity,
    Table,
    Property,
    Column,
    Collection,
    Import,
    Query,
    ResultSetMapping,
    FetchProfile,
    Filter,
    Generator,
}

impl DuplicateKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Table => "table",
            Self::Property => "property",
            Self::Column => "column",
            Self::Collection => "collection",
            Self::Import => "import",
            Self::Query => "query",
            Self::ResultSetMapping => "result_set_mapping",
            Self::FetchProfile => "fetch_profile",
            Self::Filter => "filter",
            Self::Generator => "generator",
        }
    }
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum MappingError {
    /// Mapping metadata is invalid.
    #[error("{message}")]
    Mapping {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A definition was registered twice under one name.
    #[error("{message}: {kind} mapping [{name}]")]
    DuplicateMapping {
        message: String,
        kind: DuplicateKind,
        name: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A mapping document could not be located.
    #[error("{message} ({origin_type}): {origin_name}")]
    MappingNotFound {
        message: String,
        origin_type: String,
        origin_name: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A mapped property has no accessor on its type.
    #[error("{message} [{}]", qualify(.type_name, .property_name))]
    PropertyNotFound {
        message: String,
        type_name: String,
        property_name: String,
        #[source]
        cause: Option<Cause>,
    },

    /// An entity name is not mapped.
    #[error("{message}: {entity_name}")]
    UnknownEntityType {
        message: String,
        entity_name: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl MappingError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::Mapping { .. } => ErrorKind::Mapping,
            Self::DuplicateMapping { .. } => ErrorKind::DuplicateMapping,
            Self::MappingNotFound { .. } => ErrorKind::MappingNotFound,
            Self::PropertyNotFound { .. } => ErrorKind::PropertyNotFound,
            Self::UnknownEntityType { .. } => ErrorKind::UnknownEntityType,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::Mapping { message, .. }
            | Self::DuplicateMapping { message, .. }
            | Self::MappingNotFound { message, .. }
            | Self::PropertyNotFound { message, .. }
            | Self::UnknownEntityType { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::Mapping { cause, .. }
            | Self::DuplicateMapping { cause, .. }
            | Self::MappingNotFound { cause, .. }
            | Self::PropertyNotFound { cause, .. }
            | Self::UnknownEntityType { cause, .. } => *cause = Some(new_cause),
        }
    }

    pub(crate) fn entity_name(&self) -> Option<&str> {
        match self {
            Self::UnknownEntityType { entity_name, .. } => Some(entity_name.as_str()),
            _ => None,
        }
    }

    pub(crate) fn property_name(&self) -> Option<&str> {
        match self {
            Self::PropertyNotFound { property_name, .. } => Some(property_name.as_str()),
            _ => None,
        }
    }
}

impl OrmError {
    pub fn mapping(message: impl Into<String>) -> Self {
        MappingError::Mapping {
            message: message.into(),
            cause: None,
        }
        .into()
    }

    pub fn duplicate_mapping(kind: DuplicateKind, name: impl Into<String>) -> Self {
        MappingError::DuplicateMapping {
            message: "Duplicate mapping definition".to_string(),
            kind,
            name: name.into(),
            cause: None,
        }
        .into()
    }

    pub fn mapping_not_found(origin_type: impl Into<String>, origin_name: impl Into<String>) -> Self {
        MappingError::MappingNotFound {
            message: "Mapping not found".to_string(),
            origin_type: origin_type.into(),
            origin_name: origin_name.into(),
            cause: None,
        }
        .into()
    }

    pub fn property_not_found(type_name: impl Into<String>, property_name: impl Into<String>) -> Self {
        MappingError::PropertyNotFound {
            message: "Could not locate property".to_string(),
            type_name: type_name.into(),
            property_name: property_name.into(),
            cause: None,
        }
        .into()
    }

    pub fn unknown_entity_type(entity_name: impl Into<String>) -> Self {
        MappingError::UnknownEntityType {
            message: "Unknown entity type".to_string(),
            entity_name: entity_name.into(),
            cause: None,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_mapping_names_kind_and_name() {
        let err = OrmError::duplicate_mapping(DuplicateKind::Table, "orders");
        assert_eq!(
            err.to_string(),
            "Duplicate mapping definition: table mapping [orders]"
        );
    }

    #[test]
    fn property_not_found_qualifies_property() {
        let err = OrmError::property_not_found("Order", "total");
        assert_eq!(err.to_string(), "Could not locate property [Order.total]");
        assert_eq!(err.property_name(), Some("total"));
    }

    #[test]
    fn mapping_not_found_names_origin() {
        let err = OrmError::mapping_not_found("resource", "mappings/Order.xml");
        assert_eq!(
            err.to_string(),
            "Mapping not found (resource): mappings/Order.xml"
        );
    }

    #[test]
    fn unknown_entity_type_exposes_entity_name() {
        let err = OrmError::unknown_entity_type("Invoice");
        assert_eq!(err.entity_name(), Some("Invoice"));
        assert_eq!(err.to_string(), "Unknown entity type: Invoice");
    }
}
