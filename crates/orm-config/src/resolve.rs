//! Resolution of raw settings into typed factory settings.

use orm_core::options::{
    CacheMode, ConnectionAcquisitionMode, ConnectionReleaseMode, FetchMode, FlushMode,
    GraphParserMode, LockMode, MultiTenancyStrategy, NullPrecedence,
    PhysicalConnectionHandlingMode, RawSetting, ReplicationMode, ScrollMode,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, OrmConfig};

/// Settings a session factory runs with, after every option is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FactorySettings {
    pub connection_handling_mode: PhysicalConnectionHandlingMode,
    pub multi_tenancy: MultiTenancyStrategy,
    pub tenant_identifier: Option<String>,
    pub graph_parser_mode: GraphParserMode,
    pub null_precedence: NullPrecedence,
    pub flush_mode: FlushMode,
    pub cache_mode: CacheMode,
    pub scroll_mode: ScrollMode,
    pub lock_mode: LockMode,
    pub replication_mode: ReplicationMode,
    pub fetch_mode: FetchMode,
    pub default_read_only: bool,
    pub interceptor: Option<String>,
    pub jdbc_batch_size: u32,
    pub jdbc_fetch_size: Option<u32>,
    pub default_batch_fetch_size: Option<u32>,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            connection_handling_mode:
                PhysicalConnectionHandlingMode::DelayedAcquisitionAndReleaseAfterTransaction,
            multi_tenancy: MultiTenancyStrategy::None,
            tenant_identifier: None,
            graph_parser_mode: GraphParserMode::Legacy,
            null_precedence: NullPrecedence::None,
            flush_mode: FlushMode::Auto,
            cache_mode: CacheMode::Normal,
            scroll_mode: ScrollMode::ScrollInsensitive,
            lock_mode: LockMode::None,
            replication_mode: ReplicationMode::Exception,
            fetch_mode: FetchMode::Select,
            default_read_only: false,
            interceptor: None,
            jdbc_batch_size: 0,
            jdbc_fetch_size: None,
            default_batch_fetch_size: None,
        }
    }
}

impl FactorySettings {
    #[must_use]
    pub const fn is_multi_tenant(&self) -> bool {
        !matches!(self.multi_tenancy, MultiTenancyStrategy::None)
    }
}

fn text<T>(value: &str) -> Option<RawSetting<'_, T>> {
    Some(RawSetting::Text(value))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl OrmConfig {
    /// Interpret every raw setting, applying defaults where a setting is
    /// absent.
    ///
    /// A legacy release/acquisition pair, when either half is present,
    /// overrides `connection.handling_mode`.
    pub fn resolve(&self) -> Result<FactorySettings, ConfigError> {
        let defaults = FactorySettings::default();

        let connection_handling_mode = if self.connection.has_legacy_modes() {
            let acquisition =
                ConnectionAcquisitionMode::interpret(text(&self.connection.acquisition_mode))?
                    .unwrap_or(ConnectionAcquisitionMode::AsNeeded);
            let release = ConnectionReleaseMode::interpret(text(&self.connection.release_mode))?;
            match (acquisition, release) {
                // "auto" release with default acquisition leaves the handling mode in charge
                (ConnectionAcquisitionMode::AsNeeded, None) => {
                    PhysicalConnectionHandlingMode::interpret(text(&self.connection.handling_mode))?
                        .unwrap_or(defaults.connection_handling_mode)
                }
                (acquisition, release) => {
                    PhysicalConnectionHandlingMode::from_modes(acquisition, release)?
                }
            }
        } else {
            PhysicalConnectionHandlingMode::interpret(text(&self.connection.handling_mode))?
                .unwrap_or(defaults.connection_handling_mode)
        };

        let settings = FactorySettings {
            connection_handling_mode,
            multi_tenancy: MultiTenancyStrategy::interpret(text(&self.multi_tenancy.strategy)),
            tenant_identifier: self.multi_tenancy.tenant_identifier().map(str::to_string),
            graph_parser_mode: GraphParserMode::interpret(text(&self.query.graph_parser_mode))?,
            null_precedence: NullPrecedence::parse_or(
                Some(self.query.default_null_ordering.as_str()),
                defaults.null_precedence,
            ),
            flush_mode: FlushMode::interpret(text(&self.session.flush_mode))?
                .unwrap_or(defaults.flush_mode),
            cache_mode: CacheMode::interpret(text(&self.session.cache_mode))?
                .unwrap_or(defaults.cache_mode),
            scroll_mode: ScrollMode::interpret(text(&self.query.scroll_mode))?
                .unwrap_or(defaults.scroll_mode),
            lock_mode: LockMode::interpret(text(&self.session.lock_mode))?,
            replication_mode: ReplicationMode::interpret(text(&self.session.replication_mode))?
                .unwrap_or(defaults.replication_mode),
            fetch_mode: FetchMode::interpret(text(&self.session.default_fetch_mode))?
                .unwrap_or(defaults.fetch_mode),
            default_read_only: self.session.default_read_only,
            interceptor: non_blank(&self.session.interceptor),
            jdbc_batch_size: self.jdbc.batch_size,
            jdbc_fetch_size: self.jdbc.fetch_size,
            default_batch_fetch_size: self.jdbc.default_batch_fetch_size,
        };

        tracing::debug!(
            handling_mode = %settings.connection_handling_mode,
            multi_tenancy = %settings.multi_tenancy,
            flush_mode = %settings.flush_mode,
            "resolved factory settings"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orm_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = OrmConfig::default().resolve().unwrap();
        assert_eq!(settings, FactorySettings::default());
        assert!(!settings.is_multi_tenant());
    }

    #[test]
    fn legacy_pair_overrides_handling_mode() {
        let mut config = OrmConfig::default();
        config.connection.handling_mode = "delayed_acquisition_and_hold".to_string();
        config.connection.release_mode = "after_statement".to_string();
        let settings = config.resolve().unwrap();
        assert_eq!(
            settings.connection_handling_mode,
            PhysicalConnectionHandlingMode::DelayedAcquisitionAndReleaseAfterStatement
        );
    }

    #[test]
    fn auto_release_defers_to_handling_mode() {
        let mut config = OrmConfig::default();
        config.connection.handling_mode = "delayed_acquisition_and_hold".to_string();
        config.connection.release_mode = "auto".to_string();
        let settings = config.resolve().unwrap();
        assert_eq!(
            settings.connection_handling_mode,
            PhysicalConnectionHandlingMode::DelayedAcquisitionAndHold
        );
    }

    #[test]
    fn immediate_acquisition_with_early_release_fails() {
        let mut config = OrmConfig::default();
        config.connection.acquisition_mode = "immediately".to_string();
        config.connection.release_mode = "after_transaction".to_string();
        let err = config.resolve().unwrap_err();
        assert_eq!(
            err.as_orm().map(orm_core::errors::OrmError::kind),
            Some(ErrorKind::InvalidConfiguration)
        );
    }

    #[test]
    fn unknown_tenancy_and_null_ordering_are_lenient() {
        let mut config = OrmConfig::default();
        config.multi_tenancy.strategy = "per_planet".to_string();
        config.query.default_null_ordering = "middle".to_string();
        let settings = config.resolve().unwrap();
        assert_eq!(settings.multi_tenancy, MultiTenancyStrategy::None);
        assert_eq!(settings.null_precedence, NullPrecedence::None);
    }

    #[test]
    fn unknown_flush_mode_is_rejected() {
        let mut config = OrmConfig::default();
        config.session.flush_mode = "sometimes".to_string();
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("sometimes"));
        assert!(err.to_string().contains("orm.flush_mode"));
    }
}
