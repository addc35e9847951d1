//! Ledger Transaction Engine
//!
//! # Overview
//!
//! This library maintains customer monetary accounts and applies financial
//! operations (deposit, withdrawal, transfer) against them while preserving
//! balance correctness under concurrent access. It is the core behind a
//! banking front end: the presentation layer (HTTP, CLI, forms) parses and
//! validates raw input into the typed values defined here, calls the engine,
//! and renders whatever comes back.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Transaction, Amount, errors)
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Account records and number generation
//!   - [`core::transaction_log`] - Append-only audit trail
//!   - [`core::engine`] - Operation validation and atomic application
//!   - [`core::directory`] - Account creation, login, listings
//!
//! # Guarantees
//!
//! - Balances never go negative: debits are checked against the freshest
//!   balance inside the account's exclusive section.
//! - Accepted operations are atomic and logged exactly once (twice for a
//!   transfer: one cross-referenced entry per side); rejected operations
//!   leave no trace.
//! - Operations on unrelated accounts never block each other; transfers
//!   lock their two accounts in ascending account-number order, so opposing
//!   concurrent transfers cannot deadlock.
//! - All money arithmetic uses exact decimals, never floating point.
//!
//! # Example
//!
//! ```
//! use rust_ledger_engine::{AccountDirectory, LedgerEngine};
//! use rust_ledger_engine::types::{AccountHolder, AccountType, Amount, Pin};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(LedgerEngine::new());
//! let directory = AccountDirectory::new(Arc::clone(&engine));
//!
//! let holder = AccountHolder {
//!     first_name: "John".to_string(),
//!     last_name: "Doe".to_string(),
//!     email: "john@example.com".to_string(),
//!     phone: "5551234567".to_string(),
//!     address: "1 Main St".to_string(),
//!     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//! };
//! let pin = Pin::parse("1234").unwrap();
//!
//! let number = directory
//!     .create_account(holder, AccountType::Savings, &pin, Decimal::new(100_00, 2))
//!     .unwrap();
//!
//! engine
//!     .withdraw(&number, &pin, Amount::new(Decimal::new(40_00, 2)).unwrap(), None)
//!     .unwrap();
//!
//! assert_eq!(engine.balance(&number).unwrap(), Decimal::new(60_00, 2));
//! ```

// Module declarations
pub mod core;
pub mod types;

pub use crate::core::{AccountDirectory, AccountStore, LedgerEngine, TransactionLog};
pub use crate::types::{
    Account, AccountHolder, AccountNumber, AccountSummary, AccountType, Amount, LedgerError, Pin,
    PinHash, Transaction, TransactionId, TransactionKind,
};
