//! Session-level default behaviour.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw session defaults. Empty strings mean "not set".
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct SessionConfig {
    #[serde(default)]
    pub flush_mode: String,

    #[serde(default)]
    pub cache_mode: String,

    #[serde(default)]
    pub lock_mode: String,

    #[serde(default)]
    pub replication_mode: String,

    #[serde(default)]
    pub default_fetch_mode: String,

    /// Whether sessions load entities read-only unless told otherwise.
    #[serde(default)]
    pub default_read_only: bool,

    /// Name of the interceptor attached to every session.
    #[serde(default)]
    pub interceptor: String,
}
