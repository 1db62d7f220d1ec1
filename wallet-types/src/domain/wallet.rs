//! Wallet domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct WalletId(Uuid);

impl WalletId {
    /// Creates a new random WalletId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a WalletId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a caller-supplied identifier.
    ///
    /// Runs before any store access so malformed ids never reach a query.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.parse()
            .map_err(|_| DomainError::InvalidWalletId(raw.to_string()))
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for WalletId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WalletId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WalletId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A wallet row as held by the ledger store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    /// Balance in the smallest currency unit.
    pub balance: i64,
}

impl Wallet {
    pub fn from_parts(id: WalletId, balance: i64) -> Self {
        Self { id, balance }
    }

    /// Computes the balance after applying `delta`.
    ///
    /// This is the only place the non-negative balance rule is checked; adapters
    /// call it between the locked read and the write.
    pub fn apply(&self, delta: i64) -> Result<i64, DomainError> {
        let new_balance = self
            .balance
            .checked_add(delta)
            .ok_or(DomainError::BalanceOverflow)?;

        if new_balance < 0 {
            return Err(DomainError::InsufficientFunds {
                balance: self.balance,
                requested: delta.unsigned_abs(),
            });
        }

        Ok(new_balance)
    }
}
