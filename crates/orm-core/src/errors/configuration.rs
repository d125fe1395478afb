//! Invalid settings and unknown named configuration.

use thiserror::Error;

use super::context::Cause;
use super::{ErrorKind, OrmError};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A setting could not be interpreted.
    #[error("{message}{}", setting_suffix(.setting.as_deref()))]
    InvalidConfiguration {
        message: String,
        setting: Option<String>,
        #[source]
        cause: Option<Cause>,
    },

    /// A fetch profile was enabled by a name nothing defines.
    #[error("{message} [{profile}]")]
    UnknownProfile {
        message: String,
        profile: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A filter was enabled by a name nothing defines.
    #[error("{message} [{filter}]")]
    UnknownFilter {
        message: String,
        filter: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A configured type could not be instantiated.
    #[error("{message} [{type_name}]")]
    Instantiation {
        message: String,
        type_name: String,
        #[source]
        cause: Option<Cause>,
    },
}

fn setting_suffix(setting: Option<&str>) -> String {
    setting.map_or_else(String::new, |setting| format!(" (setting: {setting})"))
}

impl ConfigurationError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::UnknownProfile { .. } => ErrorKind::UnknownProfile,
            Self::UnknownFilter { .. } => ErrorKind::UnknownFilter,
            Self::Instantiation { .. } => ErrorKind::Instantiation,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::InvalidConfiguration { message, .. }
            | Self::UnknownProfile { message, .. }
            | Self::UnknownFilter { message, .. }
            | Self::Instantiation { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::InvalidConfiguration { cause, .. }
            | Self::UnknownProfile { cause, .. }
            | Self::UnknownFilter { cause, .. }
            | Self::Instantiation { cause, .. } => *cause = Some(new_cause),
        }
    }

    /// The setting name, for invalid settings.
    #[must_use]
    pub fn setting(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { setting, .. } => setting.as_deref(),
            _ => None,
        }
    }
}

impl OrmError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConfigurationError::InvalidConfiguration {
            message: message.into(),
            setting: None,
            cause: None,
        }
        .into()
    }

    /// A setting value outside the accepted set.
    pub fn invalid_setting(setting: &str, value: &str, expected: &[&str]) -> Self {
        let message = if expected.is_empty() {
            format!("Unrecognized value '{value}'")
        } else {
            format!(
                "Unrecognized value '{value}'; expected one of: {}",
                expected.join(", ")
            )
        };
        ConfigurationError::InvalidConfiguration {
            message,
            setting: Some(setting.to_string()),
            cause: None,
        }
        .into()
    }

    pub fn unknown_profile(profile: impl Into<String>) -> Self {
        ConfigurationError::UnknownProfile {
            message: "Unknown fetch profile".to_string(),
            profile: profile.into(),
            cause: None,
        }
        .into()
    }

    pub fn unknown_filter(filter: impl Into<String>) -> Self {
        ConfigurationError::UnknownFilter {
            message: "No such filter configured".to_string(),
            filter: filter.into(),
            cause: None,
        }
        .into()
    }

    pub fn instantiation(type_name: impl Into<String>) -> Self {
        ConfigurationError::Instantiation {
            message: "Could not instantiate".to_string(),
            type_name: type_name.into(),
            cause: None,
        }
        .into()
    }
}
