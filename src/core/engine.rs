//! Ledger engine: validation and atomic application of money movements
//!
//! This module provides the `LedgerEngine`, the sole authority permitted to
//! change an account balance. Every accepted operation is atomic, consistent,
//! and logged exactly once.
//!
//! # Operation lifecycle
//!
//! Each operation moves through `Received -> Validated -> Applied -> Logged
//! -> Committed`, or straight to `Rejected` on any validation failure. There
//! is no partial-commit state visible to callers: either the balance
//! mutation(s) and the log entry(ies) all land, or none do. Rejected
//! operations leave no trace, so resubmitting a rejected request is safe.
//!
//! # Locking
//!
//! The engine enters an account's exclusive section (its mutex) before
//! reading the balance and holds it until the balance mutation and the log
//! append have both completed. A transfer holds both accounts' sections
//! simultaneously, acquired in ascending account-number order regardless of
//! which side is the source, so two opposing transfers between the same pair
//! of accounts cannot deadlock.

use crate::core::account_store::{lock_account, AccountStore};
use crate::core::transaction_log::TransactionLog;
use crate::types::{
    AccountNumber, Amount, LedgerError, Pin, Transaction, TransactionKind,
};
use rust_decimal::Decimal;

/// Validates and applies deposits, withdrawals, and transfers
///
/// Owns the account store and the transaction log; callers outside the
/// engine read accounts through [`LedgerEngine::store`] but never mutate
/// balances themselves.
pub struct LedgerEngine {
    store: AccountStore,
    log: TransactionLog,
}

impl LedgerEngine {
    /// Create a new engine with an empty store and log
    pub fn new() -> Self {
        LedgerEngine {
            store: AccountStore::new(),
            log: TransactionLog::new(),
        }
    }

    /// The underlying account store
    ///
    /// Exposed for account creation and read-only lookups (directory,
    /// listings). Balance mutation stays inside the engine.
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// The underlying transaction log
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Current balance of an account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn balance(&self, account_number: &AccountNumber) -> Result<Decimal, LedgerError> {
        let handle = self
            .store
            .get(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number.as_str()))?;
        let account = lock_account(&handle);
        Ok(account.balance)
    }

    /// Deposit funds into an account
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the account does not exist
    /// * `ArithmeticOverflow` - the credit would overflow the balance
    ///
    /// (`InvalidAmount` is impossible here: [`Amount`] is positive by
    /// construction.)
    pub fn deposit(
        &self,
        account_number: &AccountNumber,
        amount: Amount,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        let handle = self
            .store
            .get(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number.as_str()))?;

        let mut account = lock_account(&handle);

        let new_balance = account
            .balance
            .checked_add(amount.get())
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", account_number.as_str()))?;

        account.balance = new_balance;
        let transaction = self.log.append(
            account_number,
            TransactionKind::Deposit,
            amount.get(),
            new_balance,
            description.unwrap_or_else(|| "Deposit".to_string()),
            None,
        );

        tracing::info!(
            "Deposited {} into account {}, new balance {}",
            amount.get(),
            account_number,
            new_balance
        );
        Ok(transaction)
    }

    /// Withdraw funds from an account
    ///
    /// The insufficient-funds check runs against the balance read inside the
    /// exclusive section, so a concurrent operation that has already
    /// committed is always visible to it.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the account does not exist
    /// * `InvalidPin` - the PIN does not match
    /// * `InsufficientFunds` - the debit would drive the balance negative
    pub fn withdraw(
        &self,
        account_number: &AccountNumber,
        pin: &Pin,
        amount: Amount,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        let handle = self
            .store
            .get(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number.as_str()))?;

        let mut account = lock_account(&handle);

        if !account.pin_hash.verify(pin) {
            return Err(LedgerError::invalid_pin(account_number.as_str()));
        }

        let requested = amount.get();
        if account.balance < requested {
            tracing::debug!(
                "Rejected withdrawal of {} from account {}: available {}",
                requested,
                account_number,
                account.balance
            );
            return Err(LedgerError::insufficient_funds(
                account_number.as_str(),
                account.balance,
                requested,
            ));
        }

        let new_balance = account.balance.checked_sub(requested).ok_or_else(|| {
            LedgerError::arithmetic_overflow("withdrawal", account_number.as_str())
        })?;

        account.balance = new_balance;
        let transaction = self.log.append(
            account_number,
            TransactionKind::Withdrawal,
            requested,
            new_balance,
            description.unwrap_or_else(|| "Withdrawal".to_string()),
            None,
        );

        tracing::info!(
            "Withdrew {} from account {}, new balance {}",
            requested,
            account_number,
            new_balance
        );
        Ok(transaction)
    }

    /// Transfer funds between two accounts atomically
    ///
    /// Debits the source and credits the destination by the same amount
    /// inside one critical section covering both accounts, then appends two
    /// cross-referenced log entries (debit side first). If any validation
    /// step fails, neither balance changes and nothing is logged.
    ///
    /// Both locks are taken in ascending account-number order regardless of
    /// transfer direction; with a total order on account numbers and at most
    /// two locks per operation this cannot deadlock.
    ///
    /// # Errors
    ///
    /// * `InvalidOperation` - self-transfer, or the destination account does
    ///   not exist (checked before any mutation)
    /// * `AccountNotFound` - the source account does not exist
    /// * `InvalidPin` - the PIN does not match the source account
    /// * `InsufficientFunds` - the source cannot cover the debit
    pub fn transfer(
        &self,
        from: &AccountNumber,
        to: &AccountNumber,
        pin: &Pin,
        amount: Amount,
        description: Option<String>,
    ) -> Result<(Transaction, Transaction), LedgerError> {
        if from == to {
            return Err(LedgerError::invalid_operation(
                "cannot transfer to the same account",
            ));
        }

        let from_handle = self
            .store
            .get(from)
            .ok_or_else(|| LedgerError::account_not_found(from.as_str()))?;
        let to_handle = self.store.get(to).ok_or_else(|| {
            LedgerError::invalid_operation(format!("destination account {to} not found"))
        })?;

        // Ascending account-number order, whichever side is the source.
        let (mut from_account, mut to_account) = if from < to {
            let from_guard = lock_account(&from_handle);
            let to_guard = lock_account(&to_handle);
            (from_guard, to_guard)
        } else {
            let to_guard = lock_account(&to_handle);
            let from_guard = lock_account(&from_handle);
            (from_guard, to_guard)
        };

        if !from_account.pin_hash.verify(pin) {
            return Err(LedgerError::invalid_pin(from.as_str()));
        }

        let requested = amount.get();
        if from_account.balance < requested {
            tracing::debug!(
                "Rejected transfer of {} from account {} to {}: available {}",
                requested,
                from,
                to,
                from_account.balance
            );
            return Err(LedgerError::insufficient_funds(
                from.as_str(),
                from_account.balance,
                requested,
            ));
        }

        // Compute both new balances before writing either, so an overflow on
        // the credit side cannot leave a dangling debit.
        let debited = from_account
            .balance
            .checked_sub(requested)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer debit", from.as_str()))?;
        let credited = to_account
            .balance
            .checked_add(requested)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer credit", to.as_str()))?;

        from_account.balance = debited;
        to_account.balance = credited;

        let debit_entry = self.log.append(
            from,
            TransactionKind::Transfer,
            requested,
            debited,
            description
                .clone()
                .unwrap_or_else(|| format!("Transfer to {to}")),
            Some(to.clone()),
        );
        let credit_entry = self.log.append(
            to,
            TransactionKind::Transfer,
            requested,
            credited,
            description.unwrap_or_else(|| format!("Transfer from {from}")),
            Some(from.clone()),
        );

        tracing::info!(
            "Transferred {} from account {} to account {}",
            requested,
            from,
            to
        );
        Ok((debit_entry, credit_entry))
    }

    /// Transaction history for an account, newest first
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist; an existing
    /// account with no activity yields an empty history.
    pub fn history(&self, account_number: &AccountNumber) -> Result<Vec<Transaction>, LedgerError> {
        if !self.store.contains(account_number) {
            return Err(LedgerError::account_not_found(account_number.as_str()));
        }
        Ok(self.log.history(account_number))
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
