//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::field;

use wallet_types::{
    ApplyOperationRequest, BalanceResponse, ErrorKind, ErrorResponse, HealthResponse,
    HealthStatus, WalletError, WalletRepository,
};

use crate::WalletService;

/// Application state shared across handlers.
pub struct AppState<R: WalletRepository> {
    pub service: WalletService<R>,
}

/// Failure returned from a handler.
#[derive(Debug)]
pub enum ApiError {
    /// The body did not bind to the expected JSON shape.
    InvalidRequest,
    Service(WalletError),
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        ApiError::Service(err)
    }
}

/// Maps every error kind to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidAmount
        | ErrorKind::UnknownOperation
        | ErrorKind::InvalidWalletId
        | ErrorKind::InsufficientFunds
        | ErrorKind::BalanceOverflow => StatusCode::BAD_REQUEST,
        ErrorKind::WalletNotFound => StatusCode::NOT_FOUND,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest => {
                (StatusCode::BAD_REQUEST, "invalid request format".to_string())
            }
            ApiError::Service(err) => {
                let status = status_for(err.kind());
                let message = match err.kind() {
                    ErrorKind::Infrastructure => {
                        tracing::error!(error = %err, "ledger store failure");
                        "internal server error".to_string()
                    }
                    _ => err.to_string(),
                };
                (status, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Health check endpoint.
pub async fn health<R: WalletRepository>(State(state): State<Arc<AppState<R>>>) -> Response {
    match state.service.health().await {
        Ok(()) => Json(HealthResponse {
            status: HealthStatus::Healthy,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: HealthStatus::Unhealthy,
                }),
            )
                .into_response()
        }
    }
}

/// Apply a deposit or withdrawal.
#[tracing::instrument(
    skip(state, payload),
    fields(wallet_id = field::Empty, operation = field::Empty, amount = field::Empty)
)]
pub async fn apply_operation<R: WalletRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<ApplyOperationRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "request body rejected");
        ApiError::InvalidRequest
    })?;

    let span = tracing::Span::current();
    span.record("wallet_id", req.wallet_id.as_str());
    span.record("operation", req.operation_type.as_str());
    span.record("amount", req.amount);

    let balance = state
        .service
        .apply(&req.wallet_id, &req.operation_type, req.amount)
        .await?;

    tracing::info!(balance, "operation applied");
    Ok(Json(BalanceResponse { balance }))
}

/// Get wallet balance by ID.
#[tracing::instrument(skip(state), fields(wallet_id = %id))]
pub async fn get_balance<R: WalletRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.service.get_balance(&id).await?;
    Ok(Json(BalanceResponse { balance }))
}
