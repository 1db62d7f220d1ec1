//! SQLite repository adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use wallet_types::{DomainError, RepoError, Wallet, WalletId, WalletRepository};

use crate::PoolConfig;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// SQLite has no row locks; every balance change holds the database write lock
/// instead, which is coarser but gives the same per-wallet ordering.
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl SqliteRepo {
    /// Creates a new SQLite repository with default pool settings.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Self::with_config(database_url, &PoolConfig::default()).await
    }

    /// Connects the pool and bootstraps the schema.
    pub async fn with_config(database_url: &str, config: &PoolConfig) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if !is_in_memory(database_url) {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives exactly as long as its one connection.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .idle_timeout(config.idle_timeout)
                .max_lifetime(config.max_lifetime)
        };

        let pool = pool_options
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await?;

        let ddl = include_str!("../migrations/0001_create_wallets.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts a wallet with the given opening balance.
    pub async fn create_wallet(&self, id: WalletId, balance: i64) -> Result<Wallet, RepoError> {
        if balance < 0 {
            return Err(DomainError::InvalidAmount(balance).into());
        }

        sqlx::query(r#"INSERT INTO wallets (id, balance) VALUES (?, ?)"#)
            .bind(id.to_string())
            .bind(balance)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Wallet::from_parts(id, balance))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl WalletRepository for SqliteRepo {
    async fn apply_operation(&self, id: WalletId, delta: i64) -> Result<i64, RepoError> {
        let id_str = id.to_string();

        // Rolled back on drop unless committed.
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        // No-op write first: it takes the write lock before the balance is read,
        // so a second writer waits here instead of reading a stale balance.
        let touched = sqlx::query(r#"UPDATE wallets SET balance = balance WHERE id = ?"#)
            .bind(&id_str)
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }

        let balance: i64 = sqlx::query_scalar(r#"SELECT balance FROM wallets WHERE id = ?"#)
            .bind(&id_str)
            .fetch_one(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let new_balance = Wallet::from_parts(id, balance).apply(delta)?;

        sqlx::query(r#"UPDATE wallets SET balance = ? WHERE id = ?"#)
            .bind(new_balance)
            .bind(&id_str)
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        tracing::debug!(wallet_id = %id, delta, new_balance, "operation committed");
        Ok(new_balance)
    }

    async fn get_balance(&self, id: WalletId) -> Result<i64, RepoError> {
        let balance: Option<i64> = sqlx::query_scalar(r#"SELECT balance FROM wallets WHERE id = ?"#)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        balance.ok_or(RepoError::NotFound(id))
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query(r#"SELECT 1"#)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }
}
