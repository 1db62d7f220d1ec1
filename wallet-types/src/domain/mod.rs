//! Domain models for the wallet ledger.

pub mod operation;
pub mod wallet;

pub use operation::OperationType;
pub use wallet::{Wallet, WalletId};
