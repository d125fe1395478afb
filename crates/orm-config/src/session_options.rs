//! Per-session options, seeded from the factory settings.

use orm_core::errors::OrmError;
use orm_core::options::{CacheMode, FlushMode, PhysicalConnectionHandlingMode};
use serde::Serialize;

use crate::FactorySettings;

/// Options a session is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOptions {
    pub flush_mode: FlushMode,
    pub cache_mode: CacheMode,
    pub connection_handling_mode: PhysicalConnectionHandlingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_identifier: Option<String>,
    pub default_read_only: bool,
    pub jdbc_batch_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interceptor_name: Option<String>,
}

impl SessionOptions {
    /// Start from the factory's defaults.
    #[must_use]
    pub fn builder(factory: &FactorySettings) -> SessionOptionsBuilder<'_> {
        SessionOptionsBuilder {
            factory,
            options: Self {
                flush_mode: factory.flush_mode,
                cache_mode: factory.cache_mode,
                connection_handling_mode: factory.connection_handling_mode,
                tenant_identifier: factory.tenant_identifier.clone(),
                default_read_only: factory.default_read_only,
                jdbc_batch_size: factory.jdbc_batch_size,
                interceptor_name: factory.interceptor.clone(),
            },
        }
    }
}

pub struct SessionOptionsBuilder<'a> {
    factory: &'a FactorySettings,
    options: SessionOptions,
}

impl SessionOptionsBuilder<'_> {
    #[must_use]
    pub fn flush_mode(mut self, flush_mode: FlushMode) -> Self {
        self.options.flush_mode = flush_mode;
        self
    }

    #[must_use]
    pub fn cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.options.cache_mode = cache_mode;
        self
    }

    #[must_use]
    pub fn connection_handling_mode(mut self, mode: PhysicalConnectionHandlingMode) -> Self {
        self.options.connection_handling_mode = mode;
        self
    }

    #[must_use]
    pub fn tenant_identifier(mut self, tenant: impl Into<String>) -> Self {
        self.options.tenant_identifier = Some(tenant.into());
        self
    }

    #[must_use]
    pub fn default_read_only(mut self, read_only: bool) -> Self {
        self.options.default_read_only = read_only;
        self
    }

    #[must_use]
    pub fn jdbc_batch_size(mut self, batch_size: u32) -> Self {
        self.options.jdbc_batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn interceptor_name(mut self, name: impl Into<String>) -> Self {
        self.options.interceptor_name = Some(name.into());
        self
    }

    /// Check the tenant against the factory's tenancy strategy.
    pub fn build(self) -> Result<SessionOptions, OrmError> {
        let mismatch = match (
            self.factory.is_multi_tenant(),
            self.options.tenant_identifier.as_deref(),
        ) {
            (true, None) => Some(format!(
                "factory configured for multi-tenancy ({}), but no tenant identifier specified",
                self.factory.multi_tenancy
            )),
            (false, Some(tenant)) => Some(format!(
                "factory is not configured for multi-tenancy, but tenant identifier '{tenant}' was specified"
            )),
            _ => None,
        };
        match mismatch {
            Some(message) => Err(OrmError::session(message)),
            None => Ok(self.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orm_core::errors::ErrorKind;
    use orm_core::options::MultiTenancyStrategy;
    use pretty_assertions::assert_eq;

    fn multi_tenant() -> FactorySettings {
        FactorySettings {
            multi_tenancy: MultiTenancyStrategy::Schema,
            ..FactorySettings::default()
        }
    }

    #[test]
    fn builder_starts_from_factory_defaults() {
        let factory = FactorySettings {
            jdbc_batch_size: 25,
            ..FactorySettings::default()
        };
        let options = SessionOptions::builder(&factory).build().unwrap();
        assert_eq!(options.flush_mode, FlushMode::Auto);
        assert_eq!(options.cache_mode, CacheMode::Normal);
        assert_eq!(options.jdbc_batch_size, 25);
        assert_eq!(options.tenant_identifier, None);
    }

    #[test]
    fn builder_overrides() {
        let options = SessionOptions::builder(&FactorySettings::default())
            .flush_mode(FlushMode::Manual)
            .cache_mode(CacheMode::Ignore)
            .connection_handling_mode(PhysicalConnectionHandlingMode::DelayedAcquisitionAndHold)
            .default_read_only(true)
            .jdbc_batch_size(50)
            .interceptor_name("audit")
            .build()
            .unwrap();
        assert_eq!(options.flush_mode, FlushMode::Manual);
        assert_eq!(options.cache_mode, CacheMode::Ignore);
        assert!(options.default_read_only);
        assert_eq!(options.jdbc_batch_size, 50);
        assert_eq!(options.interceptor_name.as_deref(), Some("audit"));
    }

    #[test]
    fn multi_tenant_factory_requires_tenant() {
        let err = SessionOptions::builder(&multi_tenant()).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Session);
        assert!(err.to_string().contains("schema"));
    }

    #[test]
    fn multi_tenant_factory_accepts_tenant() {
        let options = SessionOptions::builder(&multi_tenant())
            .tenant_identifier("acme")
            .build()
            .unwrap();
        assert_eq!(options.tenant_identifier.as_deref(), Some("acme"));
    }

    #[test]
    fn single_tenant_factory_rejects_tenant() {
        let err = SessionOptions::builder(&FactorySettings::default())
            .tenant_identifier("acme")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Session);
        assert!(err.to_string().contains("acme"));
    }
}
