//! Account storage for the ledger engine
//!
//! This module provides the `AccountStore`, the single source of truth for
//! account records and current balances.
//!
//! # Design
//!
//! Accounts live in a `DashMap` keyed by account number, with each record
//! wrapped in an `Arc<Mutex<Account>>`. The DashMap gives lock-free-ish
//! sharded access to the map itself; the per-account mutex is the exclusive
//! section the engine holds while validating, mutating, and logging an
//! operation. Handing out `Arc` clones (rather than map entry guards) lets a
//! transfer hold the locks of two accounts at once without pinning any map
//! shard.
//!
//! # Account numbers
//!
//! Numbers are generated here at creation time: the holder's date of birth
//! as `YYYYMMDD` followed by 4 random digits, retried on collision. When
//! random draws keep colliding, the suffix space is swept in order, so
//! `GenerationExhausted` is returned only when every suffix for that date of
//! birth is already taken.

use crate::types::{Account, AccountHolder, AccountNumber, AccountType, LedgerError, PinHash};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Random generation attempts before falling back to an in-order sweep
///
/// Matches the size of the 4-digit suffix space for one date of birth.
const MAX_GENERATION_ATTEMPTS: u32 = 10_000;

/// Lock an account's exclusive section
///
/// A poisoned lock means another thread panicked while holding it. Balance
/// writes are single assignments performed after all validation, so the
/// record itself is still consistent; recover the guard rather than
/// propagating the panic to unrelated callers.
pub(crate) fn lock_account(handle: &Mutex<Account>) -> MutexGuard<'_, Account> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Durable storage and retrieval of account records keyed by account number
///
/// Balances are mutated only through the handed-out lock guards, and only by
/// the ledger engine; no store method writes a balance directly. Live record
/// handles never leave the crate, so an embedding caller cannot reach a
/// balance except through the engine:
///
/// ```compile_fail
/// use rust_ledger_engine::{AccountNumber, AccountStore};
///
/// let store = AccountStore::new();
/// let number: AccountNumber = "199001015678".parse().unwrap();
/// let handle = store.get(&number); // private method
/// ```
pub struct AccountStore {
    /// Map of account numbers to account records
    accounts: DashMap<AccountNumber, Arc<Mutex<Account>>>,
}

impl AccountStore {
    /// Create a new empty store
    pub fn new() -> Self {
        AccountStore {
            accounts: DashMap::new(),
        }
    }

    /// Look up the shared handle for an account
    ///
    /// Returns `None` if the account number is unknown. The caller locks the
    /// returned handle to enter the account's exclusive section.
    ///
    /// Crate-internal: a live handle would let a caller write the balance
    /// behind the engine's back. External callers read accounts through
    /// [`snapshot`](Self::snapshot) or the directory's summaries.
    pub(crate) fn get(&self, account_number: &AccountNumber) -> Option<Arc<Mutex<Account>>> {
        self.accounts
            .get(account_number)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Whether an account exists
    pub fn contains(&self, account_number: &AccountNumber) -> bool {
        self.accounts.contains_key(account_number)
    }

    /// Number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Create a new account with a freshly generated unique number
    ///
    /// The number is the holder's date of birth (`YYYYMMDD`) plus 4 random
    /// digits, retried until an unused number is found. The new account
    /// starts with a zero balance; initial deposits are booked through the
    /// engine so they appear in the transaction log.
    ///
    /// # Errors
    ///
    /// Returns `GenerationExhausted` only when all 10,000 suffixes for the
    /// holder's date of birth are already in use. Not expected in practice.
    pub fn create(
        &self,
        holder: AccountHolder,
        account_type: AccountType,
        pin_hash: PinHash,
    ) -> Result<AccountNumber, LedgerError> {
        let prefix = holder.date_of_birth.format("%Y%m%d").to_string();

        // Random draws first; if they keep colliding, sweep the suffix space
        // in order so the error means actual saturation, not bad luck.
        let random_draws = (0..MAX_GENERATION_ATTEMPTS).map(|_| random_suffix());
        let sweep = 0..MAX_GENERATION_ATTEMPTS;

        for suffix in random_draws.chain(sweep) {
            let candidate = AccountNumber::parse(&format!("{prefix}{suffix:04}"))?;

            // The vacant-entry insert makes generate-and-claim atomic: two
            // concurrent creations can never both claim the same number.
            match self.accounts.entry(candidate.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let account = Account::new(
                        candidate.clone(),
                        account_type,
                        holder,
                        pin_hash,
                    );
                    slot.insert(Arc::new(Mutex::new(account)));
                    return Ok(candidate);
                }
            }
        }

        Err(LedgerError::GenerationExhausted)
    }

    /// Snapshot of every account record
    ///
    /// Clones each record under its own lock. Used by the directory for
    /// listings and search; the snapshot is point-in-time, not transactional
    /// across accounts.
    pub fn snapshot(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| lock_account(entry.value()).clone())
            .collect()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 4 random digits for the account-number suffix
///
/// Entropy comes from a v4 UUID, the crate's randomness source elsewhere
/// (PIN salts).
fn random_suffix() -> u32 {
    let bytes = Uuid::new_v4().into_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) % 10_000
}
