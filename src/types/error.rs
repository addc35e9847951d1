//! Error types for the Ledger Transaction Engine
//!
//! This module defines all error types that can occur while validating and
//! applying ledger operations. Every validation failure is detected before
//! any balance is touched, so an error always means "nothing happened".
//!
//! # Error Categories
//!
//! - **Lookup Errors**: Referenced account does not exist
//! - **Authorization Errors**: PIN mismatch, failed login
//! - **Validation Errors**: Non-positive amounts, malformed identifiers,
//!   self-transfers
//! - **Balance Errors**: Insufficient funds, arithmetic overflow
//! - **Generation Errors**: Account-number space exhausted

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger engine
///
/// Each variant carries the context needed to diagnose the rejection.
/// The presentation layer is responsible for translating these into
/// user-facing messages; the engine performs no formatting beyond the
/// `Display` implementations below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The referenced account number does not exist
    #[error("Account {account_number} not found")]
    AccountNotFound {
        /// The account number that was looked up
        account_number: String,
    },

    /// Login failed
    ///
    /// Deliberately does not distinguish "unknown account" from "wrong PIN"
    /// so the login surface cannot be used to enumerate account numbers.
    #[error("Invalid account number or PIN")]
    InvalidCredentials,

    /// The supplied PIN does not match the stored PIN hash
    ///
    /// Returned by withdrawal and transfer authorization, where the caller
    /// has already authenticated and account existence is not a secret.
    #[error("Invalid PIN for account {account_number}")]
    InvalidPin {
        /// The account the PIN was checked against
        account_number: String,
    },

    /// A monetary amount was zero or negative
    ///
    /// Amounts are range-checked at construction time; this error is raised
    /// at the engine boundary, never deep inside a half-applied operation.
    #[error("Invalid amount: {amount} (amounts must be positive)")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A debit would drive the balance negative
    ///
    /// The check runs against the freshest balance read inside the account's
    /// exclusive section, never against a stale snapshot.
    #[error(
        "Insufficient funds in account {account_number}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// The account that would be overdrawn
        account_number: String,
        /// Balance at the time of the check
        available: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// The operation is structurally invalid (e.g. self-transfer,
    /// non-existent destination account)
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Why the operation was rejected
        reason: String,
    },

    /// A candidate account number failed validation
    ///
    /// Account numbers are exactly 12 ASCII digits.
    #[error("Invalid account number '{value}': must be exactly 12 digits")]
    InvalidAccountNumber {
        /// The rejected input
        value: String,
    },

    /// A candidate PIN failed validation
    ///
    /// PINs are exactly 4 ASCII digits.
    #[error("Invalid PIN: must be exactly 4 digits")]
    MalformedPin,

    /// The account-number space is saturated
    ///
    /// Only possible when every generated candidate collides with an
    /// existing account. Treated as fatal and operator-visible.
    #[error("Account number generation exhausted")]
    GenerationExhausted,

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account_number}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Affected account
        account_number: String,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account_number: impl Into<String>) -> Self {
        LedgerError::AccountNotFound {
            account_number: account_number.into(),
        }
    }

    /// Create an InvalidPin error
    pub fn invalid_pin(account_number: impl Into<String>) -> Self {
        LedgerError::InvalidPin {
            account_number: account_number.into(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        account_number: impl Into<String>,
        available: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            account_number: account_number.into(),
            available,
            requested,
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        LedgerError::InvalidOperation {
            reason: reason.into(),
        }
    }

    /// Create an InvalidAccountNumber error
    pub fn invalid_account_number(value: impl Into<String>) -> Self {
        LedgerError::InvalidAccountNumber {
            value: value.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(
        operation: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.into(),
            account_number: account_number.into(),
        }
    }
}
