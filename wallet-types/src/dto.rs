//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─────────────────────────────────────────────────────────────────────────────
// Wallet DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to apply a deposit or withdrawal to a wallet.
///
/// Fields stay as raw strings so the service can report
/// `InvalidWalletId` / `UnknownOperation` instead of a binding failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOperationRequest {
    /// Target wallet ID (UUID)
    #[schema(example = "11111111-1111-1111-1111-111111111111")]
    pub wallet_id: String,
    /// `DEPOSIT` or `WITHDRAW`
    #[schema(example = "DEPOSIT")]
    pub operation_type: String,
    /// Amount in smallest currency unit, strictly positive
    #[schema(example = 1000)]
    pub amount: i64,
}

/// Balance of a wallet after an operation or on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    #[schema(example = 1000)]
    pub balance: i64,
}

/// Error body for domain and validation failures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "insufficient funds")]
    pub error: String,
}

/// Body returned when an unexpected fault is recovered at the HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InternalErrorResponse {
    /// RFC 3339 timestamp of the failure
    pub timestamp: String,
    #[schema(example = 500)]
    pub status: u16,
    #[schema(example = "internal server error")]
    pub error: String,
    /// Correlation id, also sent in the `x-request-id` header
    pub request_id: String,
    pub path: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Health DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
}
