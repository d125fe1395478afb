//! Session-state, object-identity, and illegal-usage failures.

use thiserror::Error;

use super::context::{Cause, Identifier, UNKNOWN, info_string, qualify};
use super::{ErrorKind, OrmError};

#[derive(Debug, Error)]
pub enum SessionError {
    /// The session is in a state that does not allow the operation.
    #[error("{message}")]
    Session {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A session, transaction, or cursor was used after being closed.
    #[error("{message}: {resource}")]
    ResourceClosed {
        message: String,
        resource: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A lazy association or proxy was touched without an open session.
    #[error("{message}")]
    LazyInitialization {
        message: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl SessionError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::Session { .. } => ErrorKind::Session,
            Self::ResourceClosed { .. } => ErrorKind::ResourceClosed,
            Self::LazyInitialization { .. } => ErrorKind::LazyInitialization,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::Session { message, .. }
            | Self::ResourceClosed { message, .. }
            | Self::LazyInitialization { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::Session { cause, .. }
            | Self::ResourceClosed { cause, .. }
            | Self::LazyInitialization { cause, .. } => *cause = Some(new_cause),
        }
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    /// No row exists for the requested identifier.
    #[error("{message}: {}", info_string(Some(.entity_name.as_str()), Some(.identifier)))]
    ObjectNotFound {
        message: String,
        entity_name: String,
        identifier: Identifier,
        #[source]
        cause: Option<Cause>,
    },

    /// A deleted instance was handed back to the session.
    #[error("{message}: {}", info_string(Some(.entity_name.as_str()), Some(.identifier)))]
    ObjectDeleted {
        message: String,
        entity_name: String,
        identifier: Identifier,
        #[source]
        cause: Option<Cause>,
    },

    /// The row exists but belongs to a different subtype.
    #[error("{message}: {}", info_string(Some(.entity_name.as_str()), Some(.identifier)))]
    WrongClass {
        message: String,
        entity_name: String,
        identifier: Identifier,
        #[source]
        cause: Option<Cause>,
    },

    /// A second instance with an already-managed identifier was associated.
    #[error("{message}: {}", info_string(Some(.entity_name.as_str()), Some(.identifier)))]
    NonUniqueObject {
        message: String,
        entity_name: String,
        identifier: Identifier,
        #[source]
        cause: Option<Cause>,
    },

    /// The row exists but an enabled filter hides it.
    #[error(
        "{message}: {} (filter: {filter_name})",
        info_string(Some(.entity_name.as_str()), Some(.identifier))
    )]
    EntityFiltered {
        message: String,
        entity_name: String,
        identifier: Identifier,
        filter_name: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl IdentityError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::ObjectNotFound { .. } => ErrorKind::ObjectNotFound,
            Self::ObjectDeleted { .. } => ErrorKind::ObjectDeleted,
            Self::WrongClass { .. } => ErrorKind::WrongClass,
            Self::NonUniqueObject { .. } => ErrorKind::NonUniqueObject,
            Self::EntityFiltered { .. } => ErrorKind::EntityFiltered,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::ObjectNotFound { message, .. }
            | Self::ObjectDeleted { message, .. }
            | Self::WrongClass { message, .. }
            | Self::NonUniqueObject { message, .. }
            | Self::EntityFiltered { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::ObjectNotFound { cause, .. }
            | Self::ObjectDeleted { cause, .. }
            | Self::WrongClass { cause, .. }
            | Self::NonUniqueObject { cause, .. }
            | Self::EntityFiltered { cause, .. } => *cause = Some(new_cause),
        }
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        match self {
            Self::ObjectNotFound { entity_name, .. }
            | Self::ObjectDeleted { entity_name, .. }
            | Self::WrongClass { entity_name, .. }
            | Self::NonUniqueObject { entity_name, .. }
            | Self::EntityFiltered { entity_name, .. } => entity_name,
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        match self {
            Self::ObjectNotFound { identifier, .. }
            | Self::ObjectDeleted { identifier, .. }
            | Self::WrongClass { identifier, .. }
            | Self::NonUniqueObject { identifier, .. }
            | Self::EntityFiltered { identifier, .. } => identifier,
        }
    }
}

#[derive(Debug, Error)]
pub enum UsageError {
    /// A transient instance was used where a managed one is required.
    #[error("{message}{}", entity_suffix(.entity_name.as_deref()))]
    TransientObject {
        message: String,
        entity_name: Option<String>,
        #[source]
        cause: Option<Cause>,
    },

    /// A managed instance references an unsaved transient instance.
    #[error("{message} : {} -> {transient_entity}", qualify(.owner_entity, .property_name))]
    TransientPropertyValue {
        message: String,
        transient_entity: String,
        owner_entity: String,
        property_name: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A detached instance was passed where a new one is required.
    #[error("{message}{}", entity_suffix(.entity_name.as_deref()))]
    PersistentObject {
        message: String,
        entity_name: Option<String>,
        #[source]
        cause: Option<Cause>,
    },
}

fn entity_suffix(entity_name: Option<&str>) -> String {
    format!(": {}", entity_name.unwrap_or(UNKNOWN))
}

impl UsageError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::TransientObject { .. } => ErrorKind::TransientObject,
            Self::TransientPropertyValue { .. } => ErrorKind::TransientPropertyValue,
            Self::PersistentObject { .. } => ErrorKind::PersistentObject,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::TransientObject { message, .. }
            | Self::TransientPropertyValue { message, .. }
            | Self::PersistentObject { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::TransientObject { cause, .. }
            | Self::TransientPropertyValue { cause, .. }
            | Self::PersistentObject { cause, .. } => *cause = Some(new_cause),
        }
    }

    pub(crate) fn entity_name(&self) -> Option<&str> {
        match self {
            Self::TransientObject { entity_name, .. }
            | Self::PersistentObject { entity_name, .. } => entity_name.as_deref(),
            Self::TransientPropertyValue { owner_entity, .. } => Some(owner_entity.as_str()),
        }
    }

    pub(crate) fn property_name(&self) -> Option<&str> {
        match self {
            Self::TransientPropertyValue { property_name, .. } => Some(property_name.as_str()),
            _ => None,
        }
    }
}

const TRANSIENT_REFERENCE: &str =
    "object references an unsaved transient instance - save the transient instance before flushing";

impl OrmError {
    pub fn session(message: impl Into<String>) -> Self {
        SessionError::Session {
            message: message.into(),
            cause: None,
        }
        .into()
    }

    pub fn resource_closed(resource: impl Into<String>) -> Self {
        SessionError::ResourceClosed {
            message: "resource is closed".to_string(),
            resource: resource.into(),
            cause: None,
        }
        .into()
    }

    pub fn lazy_initialization(message: impl Into<String>) -> Self {
        SessionError::LazyInitialization {
            message: message.into(),
            cause: None,
        }
        .into()
    }

    pub fn object_not_found(identifier: impl Into<Identifier>, entity_name: impl Into<String>) -> Self {
        IdentityError::ObjectNotFound {
            message: "No row with the given identifier exists".to_string(),
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            cause: None,
        }
        .into()
    }

    pub fn object_deleted(identifier: impl Into<Identifier>, entity_name: impl Into<String>) -> Self {
        IdentityError::ObjectDeleted {
            message: "deleted instance passed to merge".to_string(),
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            cause: None,
        }
        .into()
    }

    pub fn wrong_class(identifier: impl Into<Identifier>, entity_name: impl Into<String>) -> Self {
        IdentityError::WrongClass {
            message: "Object was not of the specified subclass".to_string(),
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            cause: None,
        }
        .into()
    }

    pub fn non_unique_object(identifier: impl Into<Identifier>, entity_name: impl Into<String>) -> Self {
        IdentityError::NonUniqueObject {
            message: "A different object with the same identifier value was already associated with the session"
                .to_string(),
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            cause: None,
        }
        .into()
    }

    pub fn entity_filtered(
        identifier: impl Into<Identifier>,
        entity_name: impl Into<String>,
        filter_name: impl Into<String>,
    ) -> Self {
        IdentityError::EntityFiltered {
            message: "Entity is hidden by an enabled filter".to_string(),
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            filter_name: filter_name.into(),
            cause: None,
        }
        .into()
    }

    pub fn transient_object(entity_name: Option<String>) -> Self {
        UsageError::TransientObject {
            message: TRANSIENT_REFERENCE.to_string(),
            entity_name,
            cause: None,
        }
        .into()
    }

    pub fn transient_property_value(
        transient_entity: impl Into<String>,
        owner_entity: impl Into<String>,
        property_name: impl Into<String>,
    ) -> Self {
        UsageError::TransientPropertyValue {
            message: TRANSIENT_REFERENCE.to_string(),
            transient_entity: transient_entity.into(),
            owner_entity: owner_entity.into(),
            property_name: property_name.into(),
            cause: None,
        }
        .into()
    }

    pub fn persistent_object(entity_name: Option<String>) -> Self {
        UsageError::PersistentObject {
            message: "detached entity passed to persist".to_string(),
            entity_name,
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
    fn object_not_found_appends_info_string() {
        let err = OrmError::object_not_found(7, "Customer");
        assert_eq!(
            err.to_string(),
            "No row with the given identifier exists: [Customer#7]"
        );
    }

    #[test]
    fn entity_filtered_names_filter() {
        let err = OrmError::entity_filtered("c-1", "Customer", "activeOnly");
        assert_eq!(
            err.to_string(),
            "Entity is hidden by an enabled filter: [Customer#c-1] (filter: activeOnly)"
        );
    }

    #[test]
    fn transient_property_value_names_path() {
        let err = OrmError::transient_property_value("Address", "Customer", "billingAddress");
        assert_eq!(
            err.to_string(),
            format!("{TRANSIENT_REFERENCE} : Customer.billingAddress -> Address")
        );
        assert_eq!(err.property_name(), Some("billingAddress"));
        assert_eq!(err.entity_name(), Some("Customer"));
    }

    #[test]
    fn transient_object_without_entity_degrades() {
        let err = OrmError::transient_object(None);
        assert_eq!(err.to_string(), format!("{TRANSIENT_REFERENCE}: <unknown>"));
    }

    #[test]
    fn resource_closed_names_resource() {
        assert_eq!(
            OrmError::resource_closed("session").to_string(),
            "resource is closed: session"
        );
    }
}
