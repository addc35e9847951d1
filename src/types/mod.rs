//! Types module
//!
//! Contains core data structures used throughout the ledger engine.
//! This module organizes types into logical submodules:
//! - `account`: Account, identifier, and credential types
//! - `transaction`: Transaction log entries and amounts
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountHolder, AccountNumber, AccountSummary, AccountType, Pin, PinHash};
pub use error::LedgerError;
pub use transaction::{Amount, Transaction, TransactionId, TransactionKind};
