//! Wallet Application Service
//!
//! Enforces operation-level business rules and dispatches to the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use std::future::Future;
use std::time::Duration;

use wallet_types::{OperationType, RepoError, WalletError, WalletId, WalletRepository};

/// Deadline applied to every repository call unless configured otherwise.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Application service for wallet operations.
///
/// Generic over `R: WalletRepository` - the adapter is injected at compile time.
/// Stateless apart from the repository handle, so one instance serves all requests.
pub struct WalletService<R: WalletRepository> {
    repo: R,
    operation_timeout: Duration,
}

impl<R: WalletRepository> WalletService<R> {
    /// Creates a new wallet service with the default operation deadline.
    pub fn new(repo: R) -> Self {
        Self::with_timeout(repo, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Creates a wallet service whose store calls are abandoned after `operation_timeout`.
    pub fn with_timeout(repo: R, operation_timeout: Duration) -> Self {
        Self {
            repo,
            operation_timeout,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Applies a deposit or withdrawal and returns the committed balance.
    ///
    /// Validation runs before any store access, in this order: amount,
    /// operation kind, wallet id format.
    pub async fn apply(
        &self,
        wallet_id: &str,
        operation: &str,
        amount: i64,
    ) -> Result<i64, WalletError> {
        // Checked ahead of the kind so a bad amount is reported as such even
        // when the operation name is also wrong.
        OperationType::check_amount(amount)?;

        let operation: OperationType = operation.parse()?;
        let delta = operation.signed_delta(amount)?;
        let id = WalletId::parse(wallet_id)?;

        self.within_deadline(self.repo.apply_operation(id, delta))
            .await
    }

    /// Reads the current balance of a wallet.
    pub async fn get_balance(&self, wallet_id: &str) -> Result<i64, WalletError> {
        let id = WalletId::parse(wallet_id)?;
        self.within_deadline(self.repo.get_balance(id)).await
    }

    /// Checks that the ledger store is reachable.
    pub async fn health(&self) -> Result<(), WalletError> {
        self.within_deadline(self.repo.ping()).await
    }

    /// Drops `fut` once the deadline passes. Dropping an uncommitted store
    /// transaction rolls it back, so no lock outlives the call.
    async fn within_deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, RepoError>>,
    ) -> Result<T, WalletError> {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                tracing::warn!(
                    timeout = ?self.operation_timeout,
                    "ledger store call exceeded deadline"
                );
                Err(WalletError::Timeout)
            }
        }
    }
}
