//! Property access and property value failures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::context::{Cause, qualify};
use super::{ErrorKind, OrmError};

/// Which accessor failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessDirection {
    Get,
    Set,
}

impl AccessDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "getter",
            Self::Set => "setter",
        }
    }
}

impl fmt::Display for AccessDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum PropertyError {
    /// Reading or writing a property through its accessor failed.
    #[error("{message}: {direction} of {}", qualify(.owner_type, .property_name))]
    PropertyAccess {
        message: String,
        owner_type: String,
        property_name: String,
        direction: AccessDirection,
        #[source]
        cause: Option<Cause>,
    },

    /// A property value violates its mapping (e.g. null in a not-null property).
    #[error("{message} : {}", qualify(.entity_name, .property_name))]
    PropertyValue {
        message: String,
        entity_name: String,
        property_name: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl PropertyError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::PropertyAccess { .. } => ErrorKind::PropertyAccess,
            Self::PropertyValue { .. } => ErrorKind::PropertyValue,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::PropertyAccess { message, .. } | Self::PropertyValue { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::PropertyAccess { cause, .. } | Self::PropertyValue { cause, .. } => {
                *cause = Some(new_cause);
            }
        }
    }

    pub(crate) fn entity_name(&self) -> &str {
        match self {
            Self::PropertyAccess { owner_type, .. } => owner_type,
            Self::PropertyValue { entity_name, .. } => entity_name,
        }
    }

    pub(crate) fn property_name(&self) -> &str {
        match self {
            Self::PropertyAccess { property_name, .. }
            | Self::PropertyValue { property_name, .. } => property_name,
        }
    }
}

impl OrmError {
    pub fn property_access(
        owner_type: impl Into<String>,
        property_name: impl Into<String>,
        direction: AccessDirection,
    ) -> Self {
        PropertyError::PropertyAccess {
            message: "Could not access property".to_string(),
            owner_type: owner_type.into(),
            property_name: property_name.into(),
            direction,
            cause: None,
        }
        .into()
    }

    pub fn property_value(entity_name: impl Into<String>, property_name: impl Into<String>) -> Self {
        PropertyError::PropertyValue {
            message: "not-null property references a null or transient value".to_string(),
            entity_name: entity_name.into(),
            property_name: property_name.into(),
            cause: None,
        }
        .into()
    }
}
