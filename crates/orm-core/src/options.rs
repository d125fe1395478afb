//! Policy option enums: connection handling, tenancy, parsing, ordering,
//! scrolling, caching, flushing, locking, replication, and fetching.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and match incoming names case-insensitively, so `AFTER_STATEMENT` and
//! `after_statement` resolve alike.
//!
//! Each enum's `interpret` accepts the null setting (`None`), the typed
//! value, or text. What happens to unrecognized text differs per enum and is
//! deliberate:
//!
//! | Enum | null | unrecognized text |
//! |---|---|---|
//! | [`ConnectionReleaseMode`] | `None` (`"auto"` too) | error |
//! | [`ConnectionAcquisitionMode`] | `None` | error |
//! | [`PhysicalConnectionHandlingMode`] | `None` | error |
//! | [`MultiTenancyStrategy`] | `None` variant | warn, `None` variant |
//! | [`GraphParserMode`] | `Legacy` | error |
//! | [`NullPrecedence`] | caller default | caller default |
//! | [`ScrollMode`], [`CacheMode`], [`FlushMode`], [`ReplicationMode`], [`FetchMode`] | `None` | error |
//! | [`LockMode`] | `None` variant | error |

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::errors::OrmError;
use crate::settings::{self, Properties};

// ---------------------------------------------------------------------------
// Shared interpretation
// ---------------------------------------------------------------------------

/// A closed set of named options.
pub trait PolicyOption: Copy + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Canonical name, as serialized.
    fn name(self) -> &'static str;

    /// Case-insensitive lookup by canonical name.
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.name().eq_ignore_ascii_case(name))
    }

    /// Canonical names of every variant.
    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|variant| variant.name()).collect()
    }
}

/// A setting value as it arrives: already typed, or as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSetting<'a, T> {
    Typed(T),
    Text(&'a str),
}

impl<'a, T> From<&'a str> for RawSetting<'a, T> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

/// Strict interpretation: null and blank text resolve to `None`, unknown
/// text is an invalid-configuration failure naming `setting`.
fn interpret_strict<T: PolicyOption>(
    setting: &str,
    raw: Option<RawSetting<'_, T>>,
) -> Result<Option<T>, OrmError> {
    match raw {
        None => Ok(None),
        Some(RawSetting::Typed(value)) => Ok(Some(value)),
        Some(RawSetting::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawSetting::Text(text)) => T::from_name(text)
            .map(Some)
            .ok_or_else(|| OrmError::invalid_setting(setting, text, &T::names())),
    }
}

// ---------------------------------------------------------------------------
// ConnectionReleaseMode
// ---------------------------------------------------------------------------

/// When the physical connection is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionReleaseMode {
    AfterStatement,
    BeforeTransactionCompletion,
    AfterTransaction,
    OnClose,
}

impl ConnectionReleaseMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AfterStatement => "after_statement",
            Self::BeforeTransactionCompletion => "before_transaction_completion",
            Self::AfterTransaction => "after_transaction",
            Self::OnClose => "on_close",
        }
    }

    /// Resolve a raw setting. `None` and `"auto"` both mean "let the
    /// connection handling mode decide" and resolve to `None`.
    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        if let Some(RawSetting::Text(text)) = raw {
            if text.trim().eq_ignore_ascii_case("auto") {
                return Ok(None);
            }
        }
        interpret_strict(settings::CONNECTION_RELEASE_MODE, raw)
    }
}

impl PolicyOption for ConnectionReleaseMode {
    const VARIANTS: &'static [Self] = &[
        Self::AfterStatement,
        Self::BeforeTransactionCompletion,
        Self::AfterTransaction,
        Self::OnClose,
    ];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ConnectionReleaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConnectionAcquisitionMode
// ---------------------------------------------------------------------------

/// When the physical connection is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionAcquisitionMode {
    Immediately,
    AsNeeded,
}

impl ConnectionAcquisitionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediately => "immediately",
            Self::AsNeeded => "as_needed",
        }
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::CONNECTION_ACQUISITION_MODE, raw)
    }
}

impl PolicyOption for ConnectionAcquisitionMode {
    const VARIANTS: &'static [Self] = &[Self::Immediately, Self::AsNeeded];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ConnectionAcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PhysicalConnectionHandlingMode
// ---------------------------------------------------------------------------

/// Acquisition and release timing combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalConnectionHandlingMode {
    ImmediateAcquisitionAndHold,
    DelayedAcquisitionAndHold,
    DelayedAcquisitionAndReleaseAfterStatement,
    DelayedAcquisitionAndReleaseBeforeTransactionCompletion,
    DelayedAcquisitionAndReleaseAfterTransaction,
}

impl PhysicalConnectionHandlingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImmediateAcquisitionAndHold => "immediate_acquisition_and_hold",
            Self::DelayedAcquisitionAndHold => "delayed_acquisition_and_hold",
            Self::DelayedAcquisitionAndReleaseAfterStatement => {
                "delayed_acquisition_and_release_after_statement"
            }
            Self::DelayedAcquisitionAndReleaseBeforeTransactionCompletion => {
                "delayed_acquisition_and_release_before_transaction_completion"
            }
            Self::DelayedAcquisitionAndReleaseAfterTransaction => {
                "delayed_acquisition_and_release_after_transaction"
            }
        }
    }

    #[must_use]
    pub const fn acquisition_mode(self) -> ConnectionAcquisitionMode {
        match self {
            Self::ImmediateAcquisitionAndHold => ConnectionAcquisitionMode::Immediately,
            _ => ConnectionAcquisitionMode::AsNeeded,
        }
    }

    #[must_use]
    pub const fn release_mode(self) -> ConnectionReleaseMode {
        match self {
            Self::ImmediateAcquisitionAndHold | Self::DelayedAcquisitionAndHold => {
                ConnectionReleaseMode::OnClose
            }
            Self::DelayedAcquisitionAndReleaseAfterStatement => {
                ConnectionReleaseMode::AfterStatement
            }
            Self::DelayedAcquisitionAndReleaseBeforeTransactionCompletion => {
                ConnectionReleaseMode::BeforeTransactionCompletion
            }
            Self::DelayedAcquisitionAndReleaseAfterTransaction => {
                ConnectionReleaseMode::AfterTransaction
            }
        }
    }

    /// Combine separately configured acquisition and release modes.
    ///
    /// Immediate acquisition only combines with holding the connection until
    /// close; any other release mode is rejected.
    pub fn from_modes(
        acquisition: ConnectionAcquisitionMode,
        release: Option<ConnectionReleaseMode>,
    ) -> Result<Self, OrmError> {
        match (acquisition, release) {
            (ConnectionAcquisitionMode::Immediately, None | Some(ConnectionReleaseMode::OnClose)) => {
                Ok(Self::ImmediateAcquisitionAndHold)
            }
            (ConnectionAcquisitionMode::Immediately, Some(other)) => Err(OrmError::invalid_configuration(format!(
                "only release mode on_close can be combined with acquisition mode immediately, but {other} was specified"
            ))),
            (ConnectionAcquisitionMode::AsNeeded, Some(ConnectionReleaseMode::AfterStatement)) => {
                Ok(Self::DelayedAcquisitionAndReleaseAfterStatement)
            }
            (
                ConnectionAcquisitionMode::AsNeeded,
                Some(ConnectionReleaseMode::BeforeTransactionCompletion),
            ) => Ok(Self::DelayedAcquisitionAndReleaseBeforeTransactionCompletion),
            (ConnectionAcquisitionMode::AsNeeded, Some(ConnectionReleaseMode::AfterTransaction)) => {
                Ok(Self::DelayedAcquisitionAndReleaseAfterTransaction)
            }
            (ConnectionAcquisitionMode::AsNeeded, None | Some(ConnectionReleaseMode::OnClose)) => {
                Ok(Self::DelayedAcquisitionAndHold)
            }
        }
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::CONNECTION_HANDLING, raw)
    }
}

impl PolicyOption for PhysicalConnectionHandlingMode {
    const VARIANTS: &'static [Self] = &[
        Self::ImmediateAcquisitionAndHold,
        Self::DelayedAcquisitionAndHold,
        Self::DelayedAcquisitionAndReleaseAfterStatement,
        Self::DelayedAcquisitionAndReleaseBeforeTransactionCompletion,
        Self::DelayedAcquisitionAndReleaseAfterTransaction,
    ];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for PhysicalConnectionHandlingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MultiTenancyStrategy
// ---------------------------------------------------------------------------

/// How tenant data is separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MultiTenancyStrategy {
    /// A tenant discriminator column on shared tables.
    Discriminator,
    /// A schema per tenant.
    Schema,
    /// A database per tenant.
    Database,
    /// Not multi-tenant.
    None,
}

impl MultiTenancyStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discriminator => "discriminator",
            Self::Schema => "schema",
            Self::Database => "database",
            Self::None => "none",
        }
    }

    /// Whether tenants need their own connections.
    #[must_use]
    pub const fn requires_multi_tenant_connection_provider(self) -> bool {
        matches!(self, Self::Schema | Self::Database)
    }

    /// Resolve a raw setting. Never fails: unknown text logs a warning and
    /// falls back to [`MultiTenancyStrategy::None`].
    #[must_use]
    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Self {
        match raw {
            None => Self::None,
            Some(RawSetting::Typed(strategy)) => strategy,
            Some(RawSetting::Text(text)) if text.trim().is_empty() => Self::None,
            Some(RawSetting::Text(text)) => Self::from_name(text).unwrap_or_else(|| {
                tracing::warn!(
                    setting = settings::MULTI_TENANT,
                    value = text,
                    "unknown multi-tenancy strategy; using none"
                );
                Self::None
            }),
        }
    }

    /// Determine the strategy from factory properties.
    #[must_use]
    pub fn determine_strategy(properties: &Properties) -> Self {
        Self::interpret(
            properties
                .get(settings::MULTI_TENANT)
                .map(|value| RawSetting::Text(value.as_str())),
        )
    }
}

impl PolicyOption for MultiTenancyStrategy {
    const VARIANTS: &'static [Self] =
        &[Self::Discriminator, Self::Schema, Self::Database, Self::None];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for MultiTenancyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GraphParserMode
// ---------------------------------------------------------------------------

/// Which entity-graph text parser is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GraphParserMode {
    Legacy,
    Modern,
}

impl GraphParserMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
        }
    }

    /// Resolve a raw setting. Null means `Legacy`; unknown text fails.
    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Self, OrmError> {
        Ok(interpret_strict(settings::GRAPH_PARSER_MODE, raw)?.unwrap_or(Self::Legacy))
    }
}

impl PolicyOption for GraphParserMode {
    const VARIANTS: &'static [Self] = &[Self::Legacy, Self::Modern];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for GraphParserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortDirection / NullOrdering / NullPrecedence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a database sorts nulls when the query does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    /// Nulls sort as the smallest value.
    Smallest,
    /// Nulls sort as the greatest value.
    Greatest,
    /// Nulls always come first.
    First,
    /// Nulls always come last.
    Last,
}

impl NullOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smallest => "smallest",
            Self::Greatest => "greatest",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

impl fmt::Display for NullOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested placement of nulls in an `order by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NullPrecedence {
    /// Whatever the database does.
    None,
    First,
    Last,
}

impl NullPrecedence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::First => "first",
            Self::Last => "last",
        }
    }

    /// Case-insensitive lookup; unknown or missing names yield `None`.
    #[must_use]
    pub fn parse(name: Option<&str>) -> Option<Self> {
        name.and_then(Self::from_name)
    }

    /// Like [`NullPrecedence::parse`], substituting `default` for unknown
    /// or missing names.
    #[must_use]
    pub fn parse_or(name: Option<&str>, default: Self) -> Self {
        Self::parse(name).unwrap_or(default)
    }

    /// Whether this precedence is what the database does anyway for the
    /// given sort direction, so no explicit `nulls first/last` is needed.
    #[must_use]
    pub const fn is_default_ordering(self, direction: SortDirection, nulls: NullOrdering) -> bool {
        match self {
            Self::None => true,
            Self::First => match nulls {
                NullOrdering::First => true,
                NullOrdering::Last => false,
                NullOrdering::Smallest => matches!(direction, SortDirection::Ascending),
                NullOrdering::Greatest => matches!(direction, SortDirection::Descending),
            },
            Self::Last => match nulls {
                NullOrdering::Last => true,
                NullOrdering::First => false,
                NullOrdering::Smallest => matches!(direction, SortDirection::Descending),
                NullOrdering::Greatest => matches!(direction, SortDirection::Ascending),
            },
        }
    }
}

impl PolicyOption for NullPrecedence {
    const VARIANTS: &'static [Self] = &[Self::None, Self::First, Self::Last];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for NullPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ScrollMode
// ---------------------------------------------------------------------------

/// Cursor type requested for scrollable results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    ForwardOnly,
    ScrollSensitive,
    ScrollInsensitive,
}

impl ScrollMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForwardOnly => "forward_only",
            Self::ScrollSensitive => "scroll_sensitive",
            Self::ScrollInsensitive => "scroll_insensitive",
        }
    }

    /// The driver-level result set type constant.
    #[must_use]
    pub const fn result_set_type(self) -> i32 {
        match self {
            Self::ForwardOnly => 1003,
            Self::ScrollInsensitive => 1004,
            Self::ScrollSensitive => 1005,
        }
    }

    #[must_use]
    pub const fn less_than(self, other: Self) -> bool {
        self.result_set_type() < other.result_set_type()
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::SCROLL_MODE, raw)
    }
}

impl PolicyOption for ScrollMode {
    const VARIANTS: &'static [Self] =
        &[Self::ForwardOnly, Self::ScrollSensitive, Self::ScrollInsensitive];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CacheMode
// ---------------------------------------------------------------------------

/// Whether the second-level cache is written on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CacheStoreMode {
    Use,
    Bypass,
    Refresh,
}

/// Whether the second-level cache is read on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CacheRetrieveMode {
    Use,
    Bypass,
}

/// How a session interacts with the second-level cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Read and write.
    Normal,
    /// Neither read nor write, except to invalidate on update.
    Ignore,
    /// Read only.
    Get,
    /// Write only, never read.
    Put,
    /// Write only, overwriting entries even if present.
    Refresh,
}

impl CacheMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ignore => "ignore",
            Self::Get => "get",
            Self::Put => "put",
            Self::Refresh => "refresh",
        }
    }

    #[must_use]
    pub const fn is_get_enabled(self) -> bool {
        matches!(self, Self::Normal | Self::Get)
    }

    #[must_use]
    pub const fn is_put_enabled(self) -> bool {
        matches!(self, Self::Normal | Self::Put | Self::Refresh)
    }

    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn store_mode(self) -> CacheStoreMode {
        match self {
            Self::Normal | Self::Put => CacheStoreMode::Use,
            Self::Ignore | Self::Get => CacheStoreMode::Bypass,
            Self::Refresh => CacheStoreMode::Refresh,
        }
    }

    #[must_use]
    pub const fn retrieve_mode(self) -> CacheRetrieveMode {
        if self.is_get_enabled() {
            CacheRetrieveMode::Use
        } else {
            CacheRetrieveMode::Bypass
        }
    }

    /// Combine separately requested store and retrieve modes; a missing half
    /// counts as `Use`. Both missing yields `None`.
    #[must_use]
    pub const fn from_store_and_retrieve(
        store: Option<CacheStoreMode>,
        retrieve: Option<CacheRetrieveMode>,
    ) -> Option<Self> {
        if store.is_none() && retrieve.is_none() {
            return None;
        }
        let get = !matches!(retrieve, Some(CacheRetrieveMode::Bypass));
        Some(match store {
            None | Some(CacheStoreMode::Use) => {
                if get {
                    Self::Normal
                } else {
                    Self::Put
                }
            }
            Some(CacheStoreMode::Bypass) => {
                if get {
                    Self::Get
                } else {
                    Self::Ignore
                }
            }
            Some(CacheStoreMode::Refresh) => Self::Refresh,
        })
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::CACHE_MODE, raw)
    }
}

impl PolicyOption for CacheMode {
    const VARIANTS: &'static [Self] =
        &[Self::Normal, Self::Ignore, Self::Get, Self::Put, Self::Refresh];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FlushMode
// ---------------------------------------------------------------------------

/// When pending changes are written to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlushMode {
    /// Only on explicit flush.
    Manual,
    /// At commit.
    Commit,
    /// At commit and before queries that could see stale state.
    Auto,
    /// Before every query.
    Always,
}

impl FlushMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Commit => "commit",
            Self::Auto => "auto",
            Self::Always => "always",
        }
    }

    const fn level(self) -> u8 {
        match self {
            Self::Manual => 0,
            Self::Commit => 5,
            Self::Auto => 10,
            Self::Always => 20,
        }
    }

    /// Whether this mode flushes less eagerly than `other`.
    #[must_use]
    pub const fn less_than(self, other: Self) -> bool {
        self.level() < other.level()
    }

    #[must_use]
    pub const fn is_manual_flush_mode(self) -> bool {
        matches!(self, Self::Manual)
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::FLUSH_MODE, raw)
    }
}

impl PolicyOption for FlushMode {
    const VARIANTS: &'static [Self] = &[Self::Manual, Self::Commit, Self::Auto, Self::Always];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for FlushMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LockMode
// ---------------------------------------------------------------------------

/// Lock requested when reading an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    None,
    Read,
    Optimistic,
    OptimisticForceIncrement,
    Write,
    UpgradeNowait,
    #[serde(rename = "upgrade_skiplocked")]
    UpgradeSkipLocked,
    PessimisticRead,
    PessimisticWrite,
    PessimisticForceIncrement,
}

impl LockMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Optimistic => "optimistic",
            Self::OptimisticForceIncrement => "optimistic_force_increment",
            Self::Write => "write",
            Self::UpgradeNowait => "upgrade_nowait",
            Self::UpgradeSkipLocked => "upgrade_skiplocked",
            Self::PessimisticRead => "pessimistic_read",
            Self::PessimisticWrite => "pessimistic_write",
            Self::PessimisticForceIncrement => "pessimistic_force_increment",
        }
    }

    /// Relative strength; higher levels imply the guarantees of lower ones.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Read => 5,
            Self::Optimistic => 6,
            Self::OptimisticForceIncrement => 7,
            Self::Write | Self::UpgradeNowait | Self::UpgradeSkipLocked => 10,
            Self::PessimisticRead => 12,
            Self::PessimisticWrite => 13,
            Self::PessimisticForceIncrement => 17,
        }
    }

    #[must_use]
    pub const fn greater_than(self, other: Self) -> bool {
        self.level() > other.level()
    }

    #[must_use]
    pub const fn less_than(self, other: Self) -> bool {
        self.level() < other.level()
    }

    /// Resolve a raw setting. Null means no lock; `upgrade` and `force` are
    /// accepted as older names of the pessimistic modes.
    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Self, OrmError> {
        if let Some(RawSetting::Text(text)) = raw {
            let text = text.trim();
            if text.eq_ignore_ascii_case("upgrade") {
                return Ok(Self::PessimisticWrite);
            }
            if text.eq_ignore_ascii_case("force") {
                return Ok(Self::PessimisticForceIncrement);
            }
        }
        Ok(interpret_strict(settings::LOCK_MODE, raw)?.unwrap_or(Self::None))
    }
}

impl PolicyOption for LockMode {
    const VARIANTS: &'static [Self] = &[
        Self::None,
        Self::Read,
        Self::Optimistic,
        Self::OptimisticForceIncrement,
        Self::Write,
        Self::UpgradeNowait,
        Self::UpgradeSkipLocked,
        Self::PessimisticRead,
        Self::PessimisticWrite,
        Self::PessimisticForceIncrement,
    ];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReplicationMode
// ---------------------------------------------------------------------------

/// What to do when a replicated row already exists in the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationMode {
    /// Fail on an existing row.
    Exception,
    /// Keep the existing row.
    Ignore,
    /// Replace the existing row.
    Overwrite,
    /// Replace the existing row only if its version is not newer.
    LatestVersion,
}

/// Decides overwrite from the ordering of existing against incoming
/// versions (`None` when the entity is unversioned).
type OverwriteRule = fn(Option<Ordering>) -> Result<bool, OrmError>;

fn keep_existing(_: Option<Ordering>) -> Result<bool, OrmError> {
    Ok(false)
}

fn replace_existing(_: Option<Ordering>) -> Result<bool, OrmError> {
    Ok(true)
}

fn replace_unless_newer(existing_vs_incoming: Option<Ordering>) -> Result<bool, OrmError> {
    Ok(existing_vs_incoming.is_none_or(|ordering| ordering != Ordering::Greater))
}

fn never_consulted(_: Option<Ordering>) -> Result<bool, OrmError> {
    Err(OrmError::assertion_failure(
        "replication mode exception fails before consulting the overwrite rule",
    ))
}

impl ReplicationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exception => "exception",
            Self::Ignore => "ignore",
            Self::Overwrite => "overwrite",
            Self::LatestVersion => "latest_version",
        }
    }

    fn overwrite_rule(self) -> OverwriteRule {
        match self {
            Self::Exception => never_consulted,
            Self::Ignore => keep_existing,
            Self::Overwrite => replace_existing,
            Self::LatestVersion => replace_unless_newer,
        }
    }

    /// Whether the existing row should be replaced by the incoming one.
    ///
    /// `versions` is the `(existing, incoming)` pair for a versioned entity
    /// and `None` for an unversioned one. Asking this of
    /// [`ReplicationMode::Exception`] is a framework bug.
    pub fn should_overwrite_current_version<V: Ord>(
        self,
        versions: Option<(&V, &V)>,
    ) -> Result<bool, OrmError> {
        let ordering = versions.map(|(existing, incoming)| existing.cmp(incoming));
        (self.overwrite_rule())(ordering)
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::REPLICATION_MODE, raw)
    }
}

impl PolicyOption for ReplicationMode {
    const VARIANTS: &'static [Self] =
        &[Self::Exception, Self::Ignore, Self::Overwrite, Self::LatestVersion];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ReplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FetchMode
// ---------------------------------------------------------------------------

/// How an association is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    Select,
    Join,
    Subselect,
}

impl FetchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Join => "join",
            Self::Subselect => "subselect",
        }
    }

    pub fn interpret(raw: Option<RawSetting<'_, Self>>) -> Result<Option<Self>, OrmError> {
        interpret_strict(settings::DEFAULT_FETCH_MODE, raw)
    }
}

impl PolicyOption for FetchMode {
    const VARIANTS: &'static [Self] = &[Self::Select, Self::Join, Self::Subselect];

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
