//! Append-only transaction log
//!
//! This module provides the `TransactionLog`, the immutable audit trail of
//! every accepted operation. The log never applies business rules: those are
//! checked upstream by the engine before an append is attempted, so an
//! append always succeeds.
//!
//! # Ordering
//!
//! Entries are appended per account while the engine holds that account's
//! exclusive section, so each account's history is totally ordered.
//! `history` returns entries newest first, matching how statements are
//! displayed.

use crate::types::{AccountNumber, Transaction, TransactionId, TransactionKind};
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Append-only record of every accepted operation
///
/// Each entry is filed under exactly one account; a transfer produces two
/// entries, one per side, cross-referenced via `related_account`. Entries
/// are never mutated or deleted; corrections are compensating entries.
pub struct TransactionLog {
    /// Per-account entry sequences, oldest first
    entries: DashMap<AccountNumber, Vec<Transaction>>,

    /// Next transaction id (ids are unique and monotonically assigned)
    next_id: AtomicU64,
}

impl TransactionLog {
    /// Create a new empty log
    pub fn new() -> Self {
        TransactionLog {
            entries: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append an entry for an account
    ///
    /// Called by the engine inside the account's exclusive section, after
    /// the balance mutation it records. Business validation happens before
    /// this point; the append itself never rejects.
    ///
    /// # Arguments
    ///
    /// * `account` - The account the entry is filed under
    /// * `kind` - The kind of money movement
    /// * `amount` - The amount moved (positive, validated upstream)
    /// * `balance_after` - The account's balance after the mutation
    /// * `description` - Free-text note (engine supplies a default)
    /// * `related_account` - Transfer counterparty, if any
    pub fn append(
        &self,
        account: &AccountNumber,
        kind: TransactionKind,
        amount: Decimal,
        balance_after: Decimal,
        description: String,
        related_account: Option<AccountNumber>,
    ) -> Transaction {
        let transaction = Transaction {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            account: account.clone(),
            kind,
            amount,
            balance_after,
            timestamp: Utc::now(),
            description,
            related_account,
        };

        self.entries
            .entry(account.clone())
            .or_default()
            .push(transaction.clone());

        transaction
    }

    /// Transaction history for an account, newest first
    ///
    /// Each call returns a fresh finite snapshot; appends after the call are
    /// not reflected in it. An account with no entries yields an empty
    /// vector (existence checks are the engine's concern).
    pub fn history(&self, account: &AccountNumber) -> Vec<Transaction> {
        self.entries
            .get(account)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of entries filed under an account
    pub fn entry_count(&self, account: &AccountNumber) -> usize {
        self.entries
            .get(account)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}
