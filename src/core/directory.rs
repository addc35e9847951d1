//! Account directory: creation, login, and lookups
//!
//! This module provides the `AccountDirectory`, the thin layer in front of
//! the account store that creates accounts, verifies logins, and serves
//! read-only listings. It never touches balances itself; money movement
//! goes through the [`LedgerEngine`].

use crate::core::account_store::lock_account;
use crate::core::engine::LedgerEngine;
use crate::types::{
    AccountHolder, AccountNumber, AccountSummary, AccountType, Amount, LedgerError, Pin, PinHash,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Account creation and login verification
///
/// Shares the engine with the presentation layer; multiple directories over
/// the same engine see the same accounts.
pub struct AccountDirectory {
    engine: Arc<LedgerEngine>,
}

impl AccountDirectory {
    /// Create a directory over an existing engine
    pub fn new(engine: Arc<LedgerEngine>) -> Self {
        AccountDirectory { engine }
    }

    /// Create a new account
    ///
    /// Generates a unique account number, hashes the PIN, and stores the
    /// account. A positive initial balance is booked through the engine as
    /// an opening deposit so the transaction log is complete from the first
    /// entry; zero means the account starts empty.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - the initial balance is negative (checked before
    ///   the account is created)
    /// * `GenerationExhausted` - no unused account number could be generated
    pub fn create_account(
        &self,
        holder: AccountHolder,
        account_type: AccountType,
        pin: &Pin,
        initial_balance: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        // Compare by value: negative zero is a valid empty opening balance.
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_balance));
        }

        let number = self
            .engine
            .store()
            .create(holder, account_type, PinHash::new(pin))?;

        if !initial_balance.is_zero() {
            self.engine.deposit(
                &number,
                Amount::new(initial_balance)?,
                Some("Opening deposit".to_string()),
            )?;
        }

        tracing::info!("Created account {}", number);
        Ok(number)
    }

    /// Verify a login and return the account summary
    ///
    /// The error does not reveal whether the account number was unknown or
    /// the PIN was wrong, so this surface cannot be used to probe for
    /// existing account numbers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` on any failure.
    pub fn login(
        &self,
        account_number: &AccountNumber,
        pin: &Pin,
    ) -> Result<AccountSummary, LedgerError> {
        let handle = self
            .engine
            .store()
            .get(account_number)
            .ok_or(LedgerError::InvalidCredentials)?;

        let account = lock_account(&handle);
        if !account.pin_hash.verify(pin) {
            tracing::debug!("Failed login attempt for account {}", account_number);
            return Err(LedgerError::InvalidCredentials);
        }

        Ok(account.summary())
    }

    /// Read-only summary of a single account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn summary(&self, account_number: &AccountNumber) -> Result<AccountSummary, LedgerError> {
        let handle = self
            .engine
            .store()
            .get(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number.as_str()))?;
        let account = lock_account(&handle);
        Ok(account.summary())
    }

    /// List accounts matching a filter, sorted by account number
    ///
    /// Case-insensitive substring match over account number, first name,
    /// last name, email, and phone. An empty filter returns every account.
    /// Read-only passthrough; no business logic.
    pub fn list_accounts(&self, filter: &str) -> Vec<AccountSummary> {
        let needle = filter.to_lowercase();

        let mut matches: Vec<AccountSummary> = self
            .engine
            .store()
            .snapshot()
            .iter()
            .filter(|account| {
                needle.is_empty()
                    || account.account_number.as_str().contains(&needle)
                    || account.holder.first_name.to_lowercase().contains(&needle)
                    || account.holder.last_name.to_lowercase().contains(&needle)
                    || account.holder.email.to_lowercase().contains(&needle)
                    || account.holder.phone.contains(&needle)
            })
            .map(|account| account.summary())
            .collect();

        matches.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn holder(first_name: &str, last_name: &str, email: &str, phone: &str) -> AccountHolder {
        AccountHolder {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: "1 Main St".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    fn directory() -> AccountDirectory {
        AccountDirectory::new(Arc::new(LedgerEngine::new()))
    }

    fn pin() -> Pin {
        Pin::parse("1234").unwrap()
    }

    #[test]
    fn test_create_account_books_opening_deposit() {
        let directory = directory();

        let number = directory
            .create_account(
                holder("John", "Doe", "john@example.com", "5551234567"),
                AccountType::Savings,
                &pin(),
                Decimal::new(500_00, 2),
            )
            .unwrap();

        let summary = directory.summary(&number).unwrap();
        assert_eq!(summary.balance, Decimal::new(500_00, 2));

        let history = directory.engine.history(&number).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].description, "Opening deposit");
    }

    #[test]
    fn test_create_account_with_zero_balance_has_empty_history() {
        let directory = directory();

        let number = directory
            .create_account(
                holder("John", "Doe", "john@example.com", "5551234567"),
                AccountType::Savings,
                &pin(),
                Decimal::ZERO,
            )
            .unwrap();

        assert_eq!(directory.summary(&number).unwrap().balance, Decimal::ZERO);
        assert!(directory.engine.history(&number).unwrap().is_empty());
    }

    #[test]
    fn test_create_account_accepts_negative_zero_balance() {
        let directory = directory();

        // Negative zero is value-equal to zero and must not be rejected.
        let number = directory
            .create_account(
                holder("John", "Doe", "john@example.com", "5551234567"),
                AccountType::Savings,
                &pin(),
                -Decimal::ZERO,
            )
            .unwrap();

        assert_eq!(directory.summary(&number).unwrap().balance, Decimal::ZERO);
        assert!(directory.engine.history(&number).unwrap().is_empty());
    }

    #[test]
    fn test_create_account_rejects_negative_initial_balance() {
        let directory = directory();

        let result = directory.create_account(
            holder("John", "Doe", "john@example.com", "5551234567"),
            AccountType::Savings,
            &pin(),
            Decimal::new(-100, 2),
        );

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidAmount { .. }
        ));
        // Rejected before any account was created
        assert!(directory.engine.store().is_empty());
    }

    #[test]
    fn test_login_with_correct_pin() {
        let directory = directory();
        let number = directory
            .create_account(
                holder("John", "Doe", "john@example.com", "5551234567"),
                AccountType::Savings,
                &pin(),
                Decimal::new(60_00, 2),
            )
            .unwrap();

        let summary = directory.login(&number, &pin()).unwrap();

        assert_eq!(summary.account_number, number);
        assert_eq!(summary.full_name, "John Doe");
        assert_eq!(summary.balance, Decimal::new(60_00, 2));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let directory = directory();
        let number = directory
            .create_account(
                holder("John", "Doe", "john@example.com", "5551234567"),
                AccountType::Savings,
                &pin(),
                Decimal::ZERO,
            )
            .unwrap();

        let wrong_pin = directory
            .login(&number, &Pin::parse("0000").unwrap())
            .unwrap_err();
        let unknown_account = directory
            .login(&AccountNumber::parse("197007070000").unwrap(), &pin())
            .unwrap_err();

        // Same public error either way: no account enumeration
        assert_eq!(wrong_pin, LedgerError::InvalidCredentials);
        assert_eq!(unknown_account, LedgerError::InvalidCredentials);
    }

    #[test]
    fn test_summary_for_unknown_account() {
        let directory = directory();
        let unknown = AccountNumber::parse("197007070000").unwrap();

        assert!(matches!(
            directory.summary(&unknown).unwrap_err(),
            LedgerError::AccountNotFound { .. }
        ));
    }

    fn populated_directory() -> AccountDirectory {
        let directory = directory();
        directory
            .create_account(
                holder("John", "Doe", "john.doe@example.com", "5551112222"),
                AccountType::Savings,
                &pin(),
                Decimal::ZERO,
            )
            .unwrap();
        directory
            .create_account(
                holder("Jane", "Smith", "jane@mail.test", "5553334444"),
                AccountType::Current,
                &pin(),
                Decimal::ZERO,
            )
            .unwrap();
        directory
            .create_account(
                holder("Johanna", "Doe", "johanna@mail.test", "5555556666"),
                AccountType::Savings,
                &pin(),
                Decimal::ZERO,
            )
            .unwrap();
        directory
    }

    #[rstest]
    #[case::by_last_name("doe", 2)]
    #[case::by_first_name_prefix("joh", 2)]
    #[case::case_insensitive("JANE", 1)]
    #[case::by_email_domain("mail.test", 2)]
    #[case::by_phone("5553334444", 1)]
    #[case::no_match("nobody", 0)]
    #[case::empty_returns_all("", 3)]
    fn test_list_accounts_filtering(#[case] filter: &str, #[case] expected: usize) {
        let directory = populated_directory();
        assert_eq!(directory.list_accounts(filter).len(), expected);
    }

    #[test]
    fn test_list_accounts_sorted_by_number() {
        let directory = populated_directory();

        let listed = directory.list_accounts("");
        let mut numbers: Vec<_> = listed.iter().map(|s| s.account_number.clone()).collect();
        let sorted = {
            let mut copy = numbers.clone();
            copy.sort();
            copy
        };
        assert_eq!(numbers, sorted);
        numbers.dedup();
        assert_eq!(numbers.len(), 3);
    }

    #[test]
    fn test_list_accounts_by_number_substring() {
        let directory = populated_directory();
        let all = directory.list_accounts("");
        let target = all[0].account_number.as_str().to_string();

        let matches = directory.list_accounts(&target);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].account_number.as_str(), target);
    }
}
