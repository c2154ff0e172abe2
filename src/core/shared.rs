//! Thread-safe ledger handle
//!
//! This module provides `SharedLedger`, a cloneable handle over one
//! [`Ledger`] guarded by a single `RwLock`.
//!
//! # Design
//!
//! Every operation takes the lock for its whole duration, so a payment's
//! debit and its insertion into the payment list are never observed apart,
//! and an import never interleaves with a payment. Mutations and imports
//! take the write lock; lookups and exports take the read lock.
//!
//! # Thread Safety
//!
//! Lookups return owned clones rather than references, so no caller holds
//! the lock after a method returns. A panic while the lock is held does not
//! make the ledger unusable: the poisoned guard is recovered, since every
//! mutation either completes or returns an error before changing state.

use crate::core::ledger::Ledger;
use crate::io::{ImportReport, MergeStats};
use crate::types::{Account, AccountId, Favorite, LedgerError, Money, Payment};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to a ledger shared between threads
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    /// Create a handle over an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing ledger
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run `f` with shared access to the ledger
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access to the ledger
    pub fn write<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Point-in-time copy of the whole ledger
    pub fn snapshot(&self) -> Ledger {
        self.read(Ledger::clone)
    }

    pub fn register_account(&self, phone: &str) -> Result<Account, LedgerError> {
        self.write(|ledger| ledger.register_account(phone))
    }

    pub fn deposit(&self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        self.write(|ledger| ledger.deposit(account_id, amount))
    }

    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<Account, LedgerError> {
        self.read(|ledger| ledger.find_account_by_id(account_id).cloned())
    }

    pub fn pay(&self, account_id: AccountId, amount: Money, category: &str) -> Result<Payment, LedgerError> {
        self.write(|ledger| ledger.pay(account_id, amount, category))
    }

    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<Payment, LedgerError> {
        self.read(|ledger| ledger.find_payment_by_id(payment_id).cloned())
    }

    pub fn reject(&self, payment_id: &str) -> Result<(), LedgerError> {
        self.write(|ledger| ledger.reject(payment_id))
    }

    pub fn repeat(&self, payment_id: &str) -> Result<Payment, LedgerError> {
        self.write(|ledger| ledger.repeat(payment_id))
    }

    pub fn favorite_payment(&self, payment_id: &str, name: &str) -> Result<Favorite, LedgerError> {
        self.write(|ledger| ledger.favorite_payment(payment_id, name))
    }

    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<Favorite, LedgerError> {
        self.read(|ledger| ledger.find_favorite_by_id(favorite_id).cloned())
    }

    pub fn pay_from_favorite(&self, favorite_id: &str) -> Result<Payment, LedgerError> {
        self.write(|ledger| ledger.pay_from_favorite(favorite_id))
    }

    pub fn export_account_history(&self, account_id: AccountId) -> Result<Vec<Payment>, LedgerError> {
        self.read(|ledger| ledger.export_account_history(account_id))
    }

    /// Export the dump directory under the read lock
    pub fn export(&self, dir: &Path) -> Result<(), LedgerError> {
        self.read(|ledger| ledger.export(dir))
    }

    /// Import a dump directory under the write lock
    pub fn import(&self, dir: &Path) -> Result<ImportReport, LedgerError> {
        self.write(|ledger| ledger.import(dir))
    }

    pub fn export_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        self.read(|ledger| ledger.export_to_file(path))
    }

    pub fn import_from_file(&self, path: &Path) -> Result<MergeStats, LedgerError> {
        self.write(|ledger| ledger.import_from_file(path))
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::from_ledger(ledger)
    }
}
