//! # orm-config
//!
//! Layered settings loading for the ORM using figment, and resolution of the
//! raw settings into typed [`FactorySettings`].
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ORM_*` prefix, `__` as separator)
//! 2. Project-level `orm.toml`
//! 3. User-level `~/.config/orm/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ORM_SESSION__FLUSH_MODE` -> `session.flush_mode`,
//! `ORM_JDBC__BATCH_SIZE` -> `jdbc.batch_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use orm_config::{OrmConfig, SessionOptions};
//!
//! let config = OrmConfig::load_with_dotenv().expect("config");
//! let factory = config.resolve().expect("valid settings");
//! let options = SessionOptions::builder(&factory).build().expect("session options");
//! println!("flush mode: {}", options.flush_mode);
//! ```

mod connection;
mod error;
mod jdbc;
mod query;
mod resolve;
mod session;
mod session_options;
mod tenancy;

pub use connection::ConnectionConfig;
pub use error::ConfigError;
pub use jdbc::JdbcConfig;
pub use query::QueryConfig;
pub use resolve::FactorySettings;
pub use session::SessionConfig;
pub use session_options::{SessionOptions, SessionOptionsBuilder};
pub use tenancy::MultiTenancyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use orm_core::settings::{self, Properties};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct OrmConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub multi_tenancy: MultiTenancyConfig,
    #[serde(default)]
    pub jdbc: JdbcConfig,
}

impl OrmConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`OrmConfig::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("orm.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ORM_").split("__"))
    }

    /// Build a config from flat `orm.*` properties, as handed over by
    /// bootstrap code. Unknown keys are ignored.
    pub fn from_properties(properties: &Properties) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (key, value) in properties {
            let value = value.clone();
            match key.as_str() {
                settings::CONNECTION_HANDLING => config.connection.handling_mode = value,
                settings::CONNECTION_RELEASE_MODE => config.connection.release_mode = value,
                settings::CONNECTION_ACQUISITION_MODE => {
                    config.connection.acquisition_mode = value;
                }
                settings::MULTI_TENANT => config.multi_tenancy.strategy = value,
                settings::MULTI_TENANT_IDENTIFIER => config.multi_tenancy.tenant_identifier = value,
                settings::GRAPH_PARSER_MODE => config.query.graph_parser_mode = value,
                settings::DEFAULT_NULL_ORDERING => config.query.default_null_ordering = value,
                settings::SCROLL_MODE => config.query.scroll_mode = value,
                settings::FLUSH_MODE => config.session.flush_mode = value,
                settings::CACHE_MODE => config.session.cache_mode = value,
                settings::LOCK_MODE => config.session.lock_mode = value,
                settings::REPLICATION_MODE => config.session.replication_mode = value,
                settings::DEFAULT_FETCH_MODE => config.session.default_fetch_mode = value,
                settings::DEFAULT_READ_ONLY => {
                    config.session.default_read_only = parse_flag(key, &value)?;
                }
                settings::INTERCEPTOR => config.session.interceptor = value,
                settings::JDBC_BATCH_SIZE => config.jdbc.batch_size = parse_size(key, &value)?,
                settings::JDBC_FETCH_SIZE => config.jdbc.fetch_size = Some(parse_size(key, &value)?),
                settings::DEFAULT_BATCH_FETCH_SIZE => {
                    config.jdbc.default_batch_fetch_size = Some(parse_size(key, &value)?);
                }
                _ => tracing::trace!(key = key.as_str(), "ignoring unrelated property"),
            }
        }
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orm").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Silently does nothing
    /// if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn parse_size(field: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a non-negative integer, got '{value}' ({e})"),
        })
}

fn parse_flag(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected true or false, got '{value}'"),
        }),
    }
}
