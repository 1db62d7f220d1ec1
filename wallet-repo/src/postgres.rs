//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use wallet_types::{DomainError, RepoError, Wallet, WalletId, WalletRepository};

use crate::{ConnectionParts, PoolConfig};

/// Driver options built field by field from discrete connection settings.
pub fn connect_options(parts: &ConnectionParts) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&parts.host)
        .port(parts.port)
        .username(&parts.user)
        .password(&parts.password)
        .database(&parts.database)
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository with row-level locking.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Creates the wallets table if it does not exist yet.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_wallets_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with default pool settings.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        Self::with_config(database_url, &PoolConfig::default()).await
    }

    /// Connects the pool with explicit tuning and bootstraps the schema.
    pub async fn with_config(database_url: &str, config: &PoolConfig) -> anyhow::Result<Self> {
        Self::with_options(database_url.parse::<PgConnectOptions>()?, config).await
    }

    /// Same as [`PostgresRepo::with_config`] for already-parsed driver options.
    pub async fn with_options(options: PgConnectOptions, config: &PoolConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts a wallet with the given opening balance.
    pub async fn create_wallet(&self, id: WalletId, balance: i64) -> Result<Wallet, RepoError> {
        if balance < 0 {
            return Err(DomainError::InvalidAmount(balance).into());
        }

        sqlx::query(r#"INSERT INTO wallets (id, balance) VALUES ($1, $2)"#)
            .bind(id.into_uuid())
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
impl WalletRepository for PostgresRepo {
    async fn apply_operation(&self, id: WalletId, delta: i64) -> Result<i64, RepoError> {
        // An uncommitted `Transaction` rolls back when dropped, so every early
        // return below (and a cancelled future) releases the row lock.
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        // Lock the wallet row with FOR UPDATE
        let balance: Option<i64> =
            sqlx::query_scalar(r#"SELECT balance FROM wallets WHERE id = $1 FOR UPDATE"#)
                .bind(id.into_uuid())
                .fetch_optional(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        let balance = balance.ok_or(RepoError::NotFound(id))?;
        let new_balance = Wallet::from_parts(id, balance).apply(delta)?;

        sqlx::query(r#"UPDATE wallets SET balance = $1 WHERE id = $2"#)
            .bind(new_balance)
            .bind(id.into_uuid())
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
        let balance: Option<i64> = sqlx::query_scalar(r#"SELECT balance FROM wallets WHERE id = $1"#)
            .bind(id.into_uuid())
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
