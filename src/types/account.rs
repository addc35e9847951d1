//! Account-related types for the Ledger Transaction Engine
//!
//! This module defines the Account structure, the validated identifier and
//! credential newtypes constructed at the engine boundary, and the read-only
//! summary handed back to the presentation layer.

use crate::types::LedgerError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique 12-digit account identifier
///
/// Immutable once assigned. Generated at account creation as the holder's
/// date of birth in `YYYYMMDD` form followed by 4 random digits, e.g.
/// `199001015678`. Validated at construction: exactly 12 ASCII digits.
///
/// The derived ordering is lexicographic over the digit string, which gives
/// the total order the engine relies on when locking two accounts for a
/// transfer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Number of digits in an account number
    pub const LEN: usize = 12;

    /// Parse an account number from a string
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAccountNumber` if the input is not
    /// exactly 12 ASCII digits.
    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(AccountNumber(value.to_string()))
        } else {
            Err(LedgerError::invalid_account_number(value))
        }
    }

    /// The account number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Account categories offered by the bank
///
/// Informational only: the engine applies the same rules to every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    /// Regular savings account
    #[default]
    Savings,
    /// Current/checking account
    Current,
    /// Fixed deposit account
    FixedDeposit,
    /// Recurring deposit account
    RecurringDeposit,
}

/// Personal details of the account holder
///
/// Carried for account creation, summaries, and directory search. None of
/// these fields affect engine logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolder {
    /// Holder's first name
    pub first_name: String,
    /// Holder's last name
    pub last_name: String,
    /// Contact email address
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Postal address
    pub address: String,
    /// Date of birth; also seeds the account-number prefix
    pub date_of_birth: NaiveDate,
}

impl AccountHolder {
    /// First and last name combined, e.g. "John Doe"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 4-digit PIN, validated at construction
///
/// The plaintext PIN only ever lives in this transient type; accounts store
/// a salted hash ([`PinHash`]). `Debug` is redacted so the PIN cannot leak
/// into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Number of digits in a PIN
    pub const LEN: usize = 4;

    /// Parse a PIN from a string
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedPin` if the input is not exactly
    /// 4 ASCII digits.
    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        if value.len() == Self::LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Pin(value.to_string()))
        } else {
            Err(LedgerError::MalformedPin)
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Salted SHA-256 digest of a PIN
///
/// Accounts never store the plaintext PIN. Each hash carries its own random
/// salt, so equal PINs on different accounts produce different digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinHash {
    salt: [u8; 16],
    digest: [u8; 32],
}

impl PinHash {
    /// Hash a PIN under a fresh random salt
    pub fn new(pin: &Pin) -> Self {
        let salt = *Uuid::new_v4().as_bytes();
        let digest = Self::digest(&salt, pin);
        PinHash { salt, digest }
    }

    fn digest(salt: &[u8; 16], pin: &Pin) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(pin.as_bytes());
        hasher.finalize().into()
    }

    /// Check a candidate PIN against the stored digest
    ///
    /// Folds a byte-wise XOR accumulator over both digests instead of using
    /// slice equality, so the comparison does not short-circuit on the first
    /// differing byte.
    pub fn verify(&self, pin: &Pin) -> bool {
        let candidate = Self::digest(&self.salt, pin);
        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// A customer account
///
/// `balance` is the only mutable field and is owned exclusively by the
/// ledger engine: it is read and written only inside the account's
/// exclusive section, and is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique 12-digit identifier, immutable once assigned
    pub account_number: AccountNumber,

    /// Account category (informational)
    pub account_type: AccountType,

    /// Holder's personal details
    pub holder: AccountHolder,

    /// Salted hash of the holder's 4-digit PIN
    pub pin_hash: PinHash,

    /// Current balance
    ///
    /// Invariant: `balance >= 0` at all times, enforced before any debit is
    /// committed, never after.
    pub balance: Decimal,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// Initial deposits are booked through the engine afterwards so they
    /// show up in the transaction log.
    pub fn new(
        account_number: AccountNumber,
        account_type: AccountType,
        holder: AccountHolder,
        pin_hash: PinHash,
    ) -> Self {
        Account {
            account_number,
            account_type,
            holder,
            pin_hash,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Read-only view for the presentation layer
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            account_number: self.account_number.clone(),
            full_name: self.holder.full_name(),
            account_type: self.account_type,
            balance: self.balance,
        }
    }
}

/// Read-only account view returned by login, lookups, and listings
///
/// Carries no credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// The account's 12-digit identifier
    pub account_number: AccountNumber,
    /// Holder's full name
    pub full_name: String,
    /// Account category
    pub account_type: AccountType,
    /// Balance at the time of the snapshot
    pub balance: Decimal,
}
