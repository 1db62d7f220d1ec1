//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use wallet_types::WalletRepository;

use super::handlers::{self, AppState};
use super::recovery::{REQUEST_ID_HEADER, recover_panics};
use crate::WalletService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Wallet API.
pub struct HttpServer<R: WalletRepository> {
    state: Arc<AppState<R>>,
}

impl<R: WalletRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: WalletService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Returns the service driving this server.
    pub fn service(&self) -> &WalletService<R> {
        &self.state.service
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        });

        Router::new()
            .route("/health", get(handlers::health::<R>))
            .route("/api/v1/wallet", post(handlers::apply_operation::<R>))
            .route("/api/v1/wallets/{id}", get(handlers::get_balance::<R>))
            .route(
                "/api-docs/openapi.json",
                get(|| async { Json(ApiDoc::openapi()) }),
            )
            .layer(
                // Outermost first: the id is assigned before tracing and
                // recovery see the request, and copied onto every response.
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(trace)
                    .layer(middleware::from_fn(recover_panics)),
            )
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(&self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
