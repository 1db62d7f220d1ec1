//! Panic recovery at the HTTP boundary.
//!
//! A panicking handler would otherwise tear down the connection with no
//! response. This middleware turns the unwind into the generic 500 body and
//! logs the full detail server-side only.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use uuid::Uuid;

use wallet_types::InternalErrorResponse;

/// Correlation header read from the request or generated by `SetRequestIdLayer`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const GENERIC_ERROR: &str = "internal server error";

/// Catches panics raised while serving `request`.
pub async fn recover_panics(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                user_agent = %user_agent,
                panic = %panic_message(panic.as_ref()),
                "panic recovered while serving request"
            );

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InternalErrorResponse {
                    timestamp: chrono::Utc::now().to_rfc3339(),
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    error: GENERIC_ERROR.to_string(),
                    request_id,
                    path,
                }),
            )
                .into_response()
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
