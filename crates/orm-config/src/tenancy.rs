//! Multi-tenancy settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct MultiTenancyConfig {
    /// `none`, `discriminator`, `schema`, or `database`.
    #[serde(default)]
    pub strategy: String,

    /// Tenant used by sessions that do not name one.
    #[serde(default)]
    pub tenant_identifier: String,
}

impl MultiTenancyConfig {
    pub fn tenant_identifier(&self) -> Option<&str> {
        let tenant = self.tenant_identifier.trim();
        (!tenant.is_empty()).then_some(tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tenant_is_absent() {
        let config = MultiTenancyConfig {
            tenant_identifier: " ".to_string(),
            ..MultiTenancyConfig::default()
        };
        assert_eq!(config.tenant_identifier(), None);
    }
}
