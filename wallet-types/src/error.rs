//! Error types for the wallet service.
//!
//! Every failure surfaces as a typed variant; transports map on [`ErrorKind`],
//! never on message text.

use serde::Serialize;

use crate::domain::WalletId;

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("amount must be positive")]
    InvalidAmount(i64),

    #[error("unknown operation type")]
    UnknownOperation(String),

    #[error("invalid wallet id format")]
    InvalidWalletId(String),

    #[error("insufficient funds")]
    InsufficientFunds { balance: i64, requested: u64 },

    #[error("balance overflow")]
    BalanceOverflow,
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Wallet not found: {0}")]
    NotFound(WalletId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

/// Closed discriminator over [`WalletError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidAmount,
    UnknownOperation,
    InvalidWalletId,
    WalletNotFound,
    InsufficientFunds,
    BalanceOverflow,
    Timeout,
    Infrastructure,
}

/// Service-level errors returned by `WalletService`.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("amount must be positive")]
    InvalidAmount(i64),

    #[error("unknown operation type")]
    UnknownOperation(String),

    #[error("invalid wallet id format")]
    InvalidWalletId(String),

    #[error("wallet not found")]
    WalletNotFound(WalletId),

    #[error("insufficient funds")]
    InsufficientFunds { balance: i64, requested: u64 },

    #[error("balance overflow")]
    BalanceOverflow,

    #[error("operation timed out")]
    Timeout,

    /// Connection, transaction or unexpected store failure. The detail is for logs only.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl WalletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            WalletError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            WalletError::InvalidWalletId(_) => ErrorKind::InvalidWalletId,
            WalletError::WalletNotFound(_) => ErrorKind::WalletNotFound,
            WalletError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            WalletError::BalanceOverflow => ErrorKind::BalanceOverflow,
            WalletError::Timeout => ErrorKind::Timeout,
            WalletError::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<DomainError> for WalletError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidAmount(amount) => WalletError::InvalidAmount(amount),
            DomainError::UnknownOperation(op) => WalletError::UnknownOperation(op),
            DomainError::InvalidWalletId(raw) => WalletError::InvalidWalletId(raw),
            DomainError::InsufficientFunds { balance, requested } => {
                WalletError::InsufficientFunds { balance, requested }
            }
            DomainError::BalanceOverflow => WalletError::BalanceOverflow,
        }
    }
}

impl From<RepoError> for WalletError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound(id) => WalletError::WalletNotFound(id),
            RepoError::Database(e) => WalletError::Infrastructure(e),
            RepoError::Transaction(e) => WalletError::Infrastructure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_not_found_maps_to_wallet_not_found() {
        let id = WalletId::new();
        let err: WalletError = RepoError::NotFound(id).into();
        assert_eq!(err.kind(), ErrorKind::WalletNotFound);
        assert_eq!(err.to_string(), "wallet not found");
    }

    #[test]
    fn test_domain_errors_pass_through_repo() {
        let err: WalletError = RepoError::Domain(DomainError::InsufficientFunds {
            balance: 10,
            requested: 20,
        })
        .into();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(err.to_string(), "insufficient funds");
    }

    #[test]
    fn test_store_failures_are_infrastructure() {
        let db: WalletError = RepoError::Database("connection reset".into()).into();
        let tx: WalletError = RepoError::Transaction("commit failed".into()).into();
        assert_eq!(db.kind(), ErrorKind::Infrastructure);
        assert_eq!(tx.kind(), ErrorKind::Infrastructure);
    }

    #[test]
    fn test_validation_kinds() {
        let amount: WalletError = DomainError::InvalidAmount(0).into();
        let op: WalletError = DomainError::UnknownOperation("X".into()).into();
        let id: WalletError = DomainError::InvalidWalletId("bad".into()).into();
        assert_eq!(amount.kind(), ErrorKind::InvalidAmount);
        assert_eq!(op.kind(), ErrorKind::UnknownOperation);
        assert_eq!(id.kind(), ErrorKind::InvalidWalletId);
    }
}
