//! # Wallet Application
//!
//! Binary that wires together all the components:
//! - Validate configuration from environment
//! - Initialize the repository adapter (connection pool)
//! - Create the wallet service
//! - Start the HTTP server
//! - Close the pool once the server has drained

mod config;

use anyhow::Context;
use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_hex::{WalletService, inbound::HttpServer};
use wallet_repo::build_repo;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to create OTLP span exporter")?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("wallet-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // OTLP export is opt-in; the exporter reads the endpoint itself
    let otel = if std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        Some(init_tracer()?)
    } else {
        None
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wallet_app=debug,wallet_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Pre-flight: refuse to start on a bad environment
    let config = config::Config::from_env().context("invalid configuration")?;

    tracing::info!("Starting wallet server on port {}", config.port);
    tracing::info!("Using database: {}", config.redacted_database());

    // Build repository (handles connection and schema bootstrap)
    let repo = build_repo(&config.database, &config.pool)
        .await
        .context("failed to connect to the ledger store")?;
    tracing::info!("Database connected successfully");

    // Create the wallet service
    let service = WalletService::with_timeout(repo, config.operation_timeout);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    let served = server.run(&addr).await;

    // Release pooled connections whether or not the server exited cleanly
    server.service().repo().close().await;
    tracing::info!("Server exited");

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }

    served
}
