//! # Wallet Types
//!
//! Domain types and port traits for the wallet ledger.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (WalletId, Wallet, OperationType)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, repository and service error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{OperationType, Wallet, WalletId};
pub use dto::*;
pub use error::{DomainError, ErrorKind, RepoError, WalletError};
pub use ports::WalletRepository;
