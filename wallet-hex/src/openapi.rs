//! OpenAPI document for the HTTP API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use utoipa::OpenApi;
use wallet_types::dto::{
    ApplyOperationRequest, BalanceResponse, ErrorResponse, HealthResponse, HealthStatus,
    InternalErrorResponse,
};
use wallet_types::{OperationType, WalletId};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Ledger store reachable", body = HealthResponse, example = json!({"status": "healthy"})),
        (status = 503, description = "Ledger store unreachable", body = HealthResponse, example = json!({"status": "unhealthy"}))
    )
)]
async fn health() {}

/// Apply a deposit or withdrawal to a wallet
#[utoipa::path(
    post,
    path = "/api/v1/wallet",
    tag = "wallet",
    request_body = ApplyOperationRequest,
    responses(
        (status = 200, description = "New balance", body = BalanceResponse),
        (status = 400, description = "Invalid body, amount, operation, wallet id, or insufficient funds", body = ErrorResponse),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = InternalErrorResponse),
        (status = 504, description = "Ledger store call timed out", body = ErrorResponse)
    )
)]
async fn apply_operation() {}

/// Get the balance of a wallet
#[utoipa::path(
    get,
    path = "/api/v1/wallets/{id}",
    tag = "wallet",
    params(
        ("id" = String, Path, description = "Wallet ID (UUID)")
    ),
    responses(
        (status = 200, description = "Wallet balance", body = BalanceResponse),
        (status = 400, description = "Malformed wallet id", body = ErrorResponse),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = InternalErrorResponse)
    )
)]
async fn get_balance() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallet API",
        version = "1.0.0",
        description = "Deposit, withdraw and read wallet balances"
    ),
    paths(health, apply_operation, get_balance),
    components(schemas(
        ApplyOperationRequest,
        BalanceResponse,
        ErrorResponse,
        InternalErrorResponse,
        HealthResponse,
        HealthStatus,
        OperationType,
        WalletId
    )),
    tags(
        (name = "health", description = "Liveness of the service and its store"),
        (name = "wallet", description = "Wallet balance operations")
    )
)]
pub struct ApiDoc;
