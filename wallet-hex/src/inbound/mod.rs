//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod handlers;
pub mod recovery;
mod server;

pub use handlers::{ApiError, AppState, status_for};
pub use recovery::REQUEST_ID_HEADER;
pub use server::HttpServer;
