//! Query failures, including the one recoverable condition.

use thiserror::Error;

use super::context::{Cause, bracketed};
use super::{ErrorKind, OrmError};

#[derive(Debug, Error)]
pub enum QueryError {
    /// The query could not be parsed, validated, or bound.
    #[error("{message}{}", bracketed(.query.as_deref()))]
    Query {
        message: String,
        query: Option<String>,
        #[source]
        cause: Option<Cause>,
    },

    /// A unique result was requested but several rows matched.
    ///
    /// The only recoverable failure: callers may retry asking for a list.
    #[error("{message}: {result_count}")]
    NonUniqueResult {
        message: String,
        result_count: usize,
        #[source]
        cause: Option<Cause>,
    },

    /// A parameter was missing, unknown, or of the wrong type.
    #[error("{message}{}", bracketed(.parameter.as_deref()))]
    QueryParameter {
        message: String,
        parameter: Option<String>,
        #[source]
        cause: Option<Cause>,
    },
}

impl QueryError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::Query { .. } => ErrorKind::Query,
            Self::NonUniqueResult { .. } => ErrorKind::NonUniqueResult,
            Self::QueryParameter { .. } => ErrorKind::QueryParameter,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::Query { message, .. }
            | Self::NonUniqueResult { message, .. }
            | Self::QueryParameter { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::Query { cause, .. }
            | Self::NonUniqueResult { cause, .. }
            | Self::QueryParameter { cause, .. } => *cause = Some(new_cause),
        }
    }
}

impl OrmError {
    pub fn query(message: impl Into<String>, query: Option<String>) -> Self {
        QueryError::Query {
            message: message.into(),
            query,
            cause: None,
        }
        .into()
    }

    pub fn non_unique_result(result_count: usize) -> Self {
        QueryError::NonUniqueResult {
            message: "query did not return a unique result".to_string(),
            result_count,
            cause: None,
        }
        .into()
    }

    pub fn query_parameter(message: impl Into<String>, parameter: Option<String>) -> Self {
        QueryError::QueryParameter {
            message: message.into(),
            parameter,
            cause: None,
        }
        .into()
    }
}
