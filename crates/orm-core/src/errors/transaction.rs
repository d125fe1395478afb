//! Transaction failures.

use thiserror::Error;

use super::context::Cause;
use super::{ErrorKind, OrmError};

#[derive(Debug, Error)]
pub enum TransactionError {
    /// Begin, commit, or rollback failed.
    #[error("{message}")]
    Transaction {
        message: String,
        #[source]
        cause: Option<Cause>,
    },

    /// The operation needs an active transaction and none is in progress.
    #[error("{message} [{operation}]")]
    TransactionRequired {
        message: String,
        operation: String,
        #[source]
        cause: Option<Cause>,
    },

    /// Commit was requested on a transaction marked rollback-only.
    #[error("{message}")]
    RollbackOnly {
        message: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl TransactionError {
    pub(crate) const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transaction { .. } => ErrorKind::Transaction,
            Self::TransactionRequired { .. } => ErrorKind::TransactionRequired,
            Self::RollbackOnly { .. } => ErrorKind::RollbackOnly,
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        match self {
            Self::Transaction { message, .. }
            | Self::TransactionRequired { message, .. }
            | Self::RollbackOnly { message, .. } => message,
        }
    }

    pub(crate) fn set_cause(&mut self, new_cause: Cause) {
        match self {
            Self::Transaction { cause, .. }
            | Self::TransactionRequired { cause, .. }
            | Self::RollbackOnly { cause, .. } => *cause = Some(new_cause),
        }
    }
}

impl OrmError {
    pub fn transaction(message: impl Into<String>) -> Self {
        TransactionError::Transaction {
            message: message.into(),
            cause: None,
        }
        .into()
    }

    pub fn transaction_required(operation: impl Into<String>) -> Self {
        TransactionError::TransactionRequired {
            message: "no transaction is in progress".to_string(),
            operation: operation.into(),
            cause: None,
        }
        .into()
    }

    pub fn rollback_only() -> Self {
        TransactionError::RollbackOnly {
            message: "Transaction was marked for rollback only; cannot commit".to_string(),
            cause: None,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_required_names_operation() {
        let err = OrmError::transaction_required("executeUpdate");
        assert_eq!(
            err.to_string(),
            "no transaction is in progress [executeUpdate]"
        );
        assert_eq!(err.kind(), ErrorKind::TransactionRequired);
    }

    #[test]
    fn transaction_exposes_cause() {
        let err = OrmError::transaction("commit failed")
            .with_cause(std::io::Error::other("socket closed"));
        assert_eq!(err.describe(), "commit failed; caused by: socket closed");
    }
}
