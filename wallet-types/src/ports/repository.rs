//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use crate::domain::WalletId;
use crate::error::RepoError;

/// The ledger store port.
///
/// The only component allowed to read or mutate wallet balances.
#[async_trait::async_trait]
pub trait WalletRepository: Send + Sync + 'static {
    /// Applies `delta` to the wallet balance and returns the committed balance.
    ///
    /// Implementations MUST lock the wallet row for the whole read-modify-write
    /// so concurrent calls on the same wallet serialize, and MUST reject a
    /// resulting negative balance via [`crate::Wallet::apply`]. Nothing is
    /// persisted on any error path.
    async fn apply_operation(&self, id: WalletId, delta: i64) -> Result<i64, RepoError>;

    /// Reads the current balance without locking.
    async fn get_balance(&self, id: WalletId) -> Result<i64, RepoError>;

    /// Round-trips to the store; used by the health check.
    async fn ping(&self) -> Result<(), RepoError>;
}
