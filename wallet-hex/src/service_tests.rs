//! WalletService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use wallet_types::{ErrorKind, RepoError, Wallet, WalletError, WalletId, WalletRepository};

    use crate::WalletService;

    const KNOWN_ID: &str = "11111111-1111-1111-1111-111111111111";

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        wallets: Mutex<HashMap<WalletId, i64>>,
        calls: AtomicUsize,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                wallets: Mutex::new(HashMap::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_wallet(self, id: &str, balance: i64) -> Self {
            self.wallets
                .lock()
                .unwrap()
                .insert(id.parse().unwrap(), balance);
            self
        }

        pub fn balance(&self, id: &str) -> i64 {
            self.wallets.lock().unwrap()[&id.parse::<WalletId>().unwrap()]
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WalletRepository for MockRepo {
        async fn apply_operation(&self, id: WalletId, delta: i64) -> Result<i64, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut wallets = self.wallets.lock().unwrap();
            let balance = wallets.get_mut(&id).ok_or(RepoError::NotFound(id))?;
            let new_balance = Wallet::from_parts(id, *balance).apply(delta)?;
            *balance = new_balance;
            Ok(new_balance)
        }

        async fn get_balance(&self, id: WalletId) -> Result<i64, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.wallets
                .lock()
                .unwrap()
                .get(&id)
                .copied()
                .ok_or(RepoError::NotFound(id))
        }

        async fn ping(&self) -> Result<(), RepoError> {
            Ok(())
        }
    }

    /// Repository whose calls never finish in time.
    struct StalledRepo;

    #[async_trait]
    impl WalletRepository for StalledRepo {
        async fn apply_operation(&self, _id: WalletId, _delta: i64) -> Result<i64, RepoError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(0)
        }

        async fn get_balance(&self, _id: WalletId) -> Result<i64, RepoError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(0)
        }

        async fn ping(&self) -> Result<(), RepoError> {
            Err(RepoError::Database("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_deposit_success() {
        let service = WalletService::new(MockRepo::new().with_wallet(KNOWN_ID, 1000));

        let balance = service.apply(KNOWN_ID, "DEPOSIT", 500).await.unwrap();

        assert_eq!(balance, 1500);
        assert_eq!(service.repo().balance(KNOWN_ID), 1500);
    }

    #[tokio::test]
    async fn test_withdraw_success() {
        let service = WalletService::new(MockRepo::new().with_wallet(KNOWN_ID, 1000));

        let balance = service.apply(KNOWN_ID, "WITHDRAW", 100).await.unwrap();

        assert_eq!(balance, 900);
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_funds() {
        let service = WalletService::new(MockRepo::new().with_wallet(KNOWN_ID, 50));

        let result = service.apply(KNOWN_ID, "WITHDRAW", 100).await;

        assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
        assert_eq!(service.repo().balance(KNOWN_ID), 50);
    }

    #[tokio::test]
    async fn test_non_positive_amount_fails_before_store() {
        let service = WalletService::new(MockRepo::new().with_wallet(KNOWN_ID, 1000));

        for (op, amount) in [("DEPOSIT", 0), ("WITHDRAW", 0), ("DEPOSIT", -100), ("BOGUS", -1)] {
            let result = service.apply(KNOWN_ID, op, amount).await;
            assert!(
                matches!(result, Err(WalletError::InvalidAmount(a)) if a == amount),
                "{op} {amount} should be rejected as an invalid amount"
            );
        }

        assert_eq!(service.repo().calls(), 0);
        assert_eq!(service.repo().balance(KNOWN_ID), 1000);
    }

    #[tokio::test]
    async fn test_unknown_operation_fails_before_store() {
        let service = WalletService::new(MockRepo::new().with_wallet(KNOWN_ID, 1000));

        let result = service.apply(KNOWN_ID, "TRANSFER", 100).await;

        assert!(matches!(result, Err(WalletError::UnknownOperation(op)) if op == "TRANSFER"));
        assert_eq!(service.repo().calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_wallet_id() {
        let service = WalletService::new(MockRepo::new());

        let apply = service.apply("not-a-uuid", "DEPOSIT", 100).await;
        let read = service.get_balance("not-a-uuid").await;

        assert_eq!(apply.unwrap_err().kind(), ErrorKind::InvalidWalletId);
        assert_eq!(read.unwrap_err().kind(), ErrorKind::InvalidWalletId);
        assert_eq!(service.repo().calls(), 0);
    }

    #[tokio::test]
    async fn test_wallet_not_found() {
        let service = WalletService::new(MockRepo::new());
        let missing = WalletId::new().to_string();

        let apply = service.apply(&missing, "DEPOSIT", 100).await;
        let read = service.get_balance(&missing).await;

        assert_eq!(apply.unwrap_err().kind(), ErrorKind::WalletNotFound);
        assert_eq!(read.unwrap_err().kind(), ErrorKind::WalletNotFound);
    }

    #[tokio::test]
    async fn test_get_balance() {
        let service = WalletService::new(MockRepo::new().with_wallet(KNOWN_ID, 1400));

        assert_eq!(service.get_balance(KNOWN_ID).await.unwrap(), 1400);
    }

    #[tokio::test]
    async fn test_store_call_times_out() {
        let service = WalletService::with_timeout(StalledRepo, Duration::from_millis(20));

        let apply = service.apply(KNOWN_ID, "DEPOSIT", 1).await;
        let read = service.get_balance(KNOWN_ID).await;

        assert!(matches!(apply, Err(WalletError::Timeout)));
        assert!(matches!(read, Err(WalletError::Timeout)));
    }

    #[tokio::test]
    async fn test_health_reports_store_failure() {
        let service = WalletService::new(StalledRepo);

        let result = service.health().await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Infrastructure);
    }
}
