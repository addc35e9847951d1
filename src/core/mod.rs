//! Core business logic module
//!
//! This module contains the core ledger components:
//! - `account_store` - Account record storage and number generation
//! - `transaction_log` - Append-only audit trail
//! - `engine` - Validation and atomic application of money movements
//! - `directory` - Account creation, login, and listings

pub mod account_store;
pub mod directory;
pub mod engine;
pub mod transaction_log;

pub use account_store::AccountStore;
pub use directory::AccountDirectory;
pub use engine::LedgerEngine;
pub use transaction_log::TransactionLog;
