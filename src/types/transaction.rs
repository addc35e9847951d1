//! Transaction-related types for the Ledger Transaction Engine
//!
//! This module defines the immutable transaction log entry, the kinds of
//! money movement the engine supports, and the positive-amount newtype
//! constructed at the engine boundary.

use crate::types::{AccountNumber, LedgerError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier
///
/// Unique and monotonically assigned by the transaction log.
pub type TransactionId = u64;

/// Kinds of money movement recorded in the transaction log
///
/// Deposits and withdrawals touch one account and produce one entry each.
/// A transfer touches two accounts and produces two entries, one per side,
/// cross-referenced through [`Transaction::related_account`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    ///
    /// Requires a sufficient balance at the time of the debit.
    Withdrawal,

    /// Move funds between two accounts
    ///
    /// The debit side and the credit side each get their own entry.
    Transfer,
}

/// A strictly positive monetary amount
///
/// Range checking happens here, at construction time, so the engine never
/// sees a zero or negative amount: invalid inputs are rejected at the
/// boundary, not deep inside business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Construct an amount from a decimal value
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the value is zero or
    /// negative.
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Amount(value))
        } else {
            Err(LedgerError::invalid_amount(value))
        }
    }

    /// The underlying decimal value
    pub fn get(&self) -> Decimal {
        self.0
    }
}

/// An immutable entry in the transaction log
///
/// Created exclusively by the ledger engine as a side effect of a
/// successfully committed operation; never mutated or deleted afterwards.
/// The log is append-only: corrections are made by appending compensating
/// entries, never by editing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique, monotonically assigned identifier
    pub id: TransactionId,

    /// The account this entry is filed under
    ///
    /// A transfer produces two entries, one per side.
    pub account: AccountNumber,

    /// The kind of money movement
    pub kind: TransactionKind,

    /// The amount moved (always positive)
    pub amount: Decimal,

    /// The owning account's balance after this entry committed
    ///
    /// Audit field for statements; not consulted by engine logic.
    pub balance_after: Decimal,

    /// When the entry was written
    pub timestamp: DateTime<Utc>,

    /// Free-text note
    ///
    /// The engine substitutes a default ("Deposit", "Withdrawal",
    /// "Transfer to <account>") when the caller supplies none. No semantic
    /// effect.
    pub description: String,

    /// Counterparty account for transfers
    ///
    /// A non-owning reference used purely for display and audit;
    /// `None` for deposits and withdrawals.
    pub related_account: Option<AccountNumber>,
}
