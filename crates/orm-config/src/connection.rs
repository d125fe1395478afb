//! Physical connection handling settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw connection settings. Empty strings mean "not set".
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ConnectionConfig {
    /// Combined acquisition/release mode, e.g. `delayed_acquisition_and_hold`.
    #[serde(default)]
    pub handling_mode: String,

    /// Legacy release mode (`after_statement`, `on_close`, `auto`, ...).
    /// Together with `acquisition_mode` it takes precedence over `handling_mode`.
    #[serde(default)]
    pub release_mode: String,

    /// Legacy acquisition mode (`immediately`, `as_needed`).
    #[serde(default)]
    pub acquisition_mode: String,
}

impl ConnectionConfig {
    /// Whether either legacy release/acquisition setting is present.
    pub fn has_legacy_modes(&self) -> bool {
        !self.release_mode.trim().is_empty() || !self.acquisition_mode.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unset() {
        let config = ConnectionConfig::default();
        assert!(config.handling_mode.is_empty());
        assert!(!config.has_legacy_modes());
    }

    #[test]
    fn blank_legacy_modes_are_ignored() {
        let config = ConnectionConfig {
            release_mode: "  ".to_string(),
            ..ConnectionConfig::default()
        };
        assert!(!config.has_legacy_modes());
    }
}
