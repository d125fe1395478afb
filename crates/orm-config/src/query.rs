//! Query parsing and ordering settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct QueryConfig {
    #[serde(default)]
    pub graph_parser_mode: String,

    /// `first`, `last`, or `none`. Unrecognized values fall back to `none`.
    #[serde(default)]
    pub default_null_ordering: String,

    #[serde(default)]
    pub scroll_mode: String,
}
