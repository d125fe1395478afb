//! Property names read when building a session factory.

use std::collections::BTreeMap;

/// Flat string properties, as handed over by the bootstrap code.
pub type Properties = BTreeMap<String, String>;

pub const CONNECTION_HANDLING: &str = "orm.connection.handling_mode";
pub const CONNECTION_RELEASE_MODE: &str = "orm.connection.release_mode";
pub const CONNECTION_ACQUISITION_MODE: &str = "orm.connection.acquisition_mode";
pub const MULTI_TENANT: &str = "orm.multi_tenancy";
pub const MULTI_TENANT_IDENTIFIER: &str = "orm.multi_tenancy.tenant_identifier";
pub const GRAPH_PARSER_MODE: &str = "orm.query.graph_parser_mode";
pub const DEFAULT_NULL_ORDERING: &str = "orm.order_by.default_null_ordering";
pub const FLUSH_MODE: &str = "orm.flush_mode";
pub const CACHE_MODE: &str = "orm.cache_mode";
pub const SCROLL_MODE: &str = "orm.jdbc.scroll_mode";
pub const LOCK_MODE: &str = "orm.lock_mode";
pub const REPLICATION_MODE: &str = "orm.replication_mode";
pub const DEFAULT_FETCH_MODE: &str = "orm.default_fetch_mode";
pub const JDBC_BATCH_SIZE: &str = "orm.jdbc.batch_size";
pub const JDBC_FETCH_SIZE: &str = "orm.jdbc.fetch_size";
pub const DEFAULT_BATCH_FETCH_SIZE: &str = "orm.default_batch_fetch_size";
pub const DEFAULT_READ_ONLY: &str = "orm.session.default_read_only";
pub const INTERCEPTOR: &str = "orm.session.interceptor";
