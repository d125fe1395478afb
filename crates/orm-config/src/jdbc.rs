//! Statement batching and fetching sizes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct JdbcConfig {
    /// Statements per batch; `0` disables batching.
    #[serde(default)]
    pub batch_size: u32,

    /// Driver fetch size hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_size: Option<u32>,

    /// Default batch size for fetching lazy associations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_batch_fetch_size: Option<u32>,
}

impl JdbcConfig {
    pub const fn is_batching(&self) -> bool {
        self.batch_size > 0
    }
}
