//! # Wallet Hex
//!
//! Application service layer and HTTP adapter for the wallet ledger.
//!
//! ## Architecture
//!
//! - `service/` - Application service (business rules, operation deadline)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: WalletRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{DEFAULT_OPERATION_TIMEOUT, WalletService};
