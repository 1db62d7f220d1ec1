//! # Wallet Client SDK
//!
//! A typed Rust client for the Wallet API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use wallet_types::{ApplyOperationRequest, BalanceResponse, OperationType};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wallet API client.
pub struct WalletClient {
    base_url: String,
    http: Client,
}

impl WalletClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API and its store are healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Applies an operation and returns the new balance.
    pub async fn apply(
        &self,
        wallet_id: &str,
        operation: OperationType,
        amount: i64,
    ) -> Result<i64, ClientError> {
        let req = ApplyOperationRequest {
            wallet_id: wallet_id.to_string(),
            operation_type: operation.to_string(),
            amount,
        };
        let resp: BalanceResponse = self.post("/api/v1/wallet", &req).await?;
        Ok(resp.balance)
    }

    /// Deposits money into a wallet.
    pub async fn deposit(&self, wallet_id: &str, amount: i64) -> Result<i64, ClientError> {
        self.apply(wallet_id, OperationType::Deposit, amount).await
    }

    /// Withdraws money from a wallet.
    pub async fn withdraw(&self, wallet_id: &str, amount: i64) -> Result<i64, ClientError> {
        self.apply(wallet_id, OperationType::Withdraw, amount).await
    }

    /// Gets the balance of a wallet.
    pub async fn get_balance(&self, wallet_id: &str) -> Result<i64, ClientError> {
        let resp: BalanceResponse = self.get(&format!("/api/v1/wallets/{}", wallet_id)).await?;
        Ok(resp.balance)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
