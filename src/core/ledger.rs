//! Ledger aggregate
//!
//! This module provides the `Ledger` that owns accounts, payments and
//! favorites, and coordinates the identifier allocator with the account
//! registry. Payment and favorite operations live in their own modules as
//! further `impl Ledger` blocks.
//!
//! The ledger enforces business rules such as:
//! - Phone uniqueness across accounts
//! - Strictly positive deposit and payment amounts
//! - Every payment and favorite referencing an existing account at creation
//!
//! There is no global instance: callers own a `Ledger` directly or share it
//! through [`crate::core::SharedLedger`].

use crate::core::account_registry::AccountRegistry;
use crate::core::id_allocator::IdAllocator;
use crate::core::record_store::{RecordStore, Upsert};
use crate::types::{Account, AccountId, Favorite, LedgerError, Money, Payment};
use tracing::debug;

/// In-memory aggregate of accounts, payments and favorites
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub(crate) ids: IdAllocator,
    pub(crate) accounts: AccountRegistry,
    pub(crate) payments: RecordStore<Payment>,
    pub(crate) favorites: RecordStore<Favorite>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account with a zero balance
    ///
    /// Allocates the next sequential account ID. No ID is consumed when
    /// registration fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any account already uses `phone`
    /// - Every account ID up to `AccountId::MAX` is taken
    pub fn register_account(&mut self, phone: &str) -> Result<Account, LedgerError> {
        if self.accounts.is_phone_registered(phone) {
            return Err(LedgerError::phone_already_registered(phone));
        }

        let id = self.ids.next_account_id()?;
        let account = self.accounts.register(id, phone)?.clone();
        debug!(account_id = id, phone, "registered account");
        Ok(account)
    }

    /// Increase an account balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - The account does not exist
    /// - The balance would overflow
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let balance = self.accounts.credit(account_id, amount, "deposit")?;
        debug!(account_id, amount, balance, "deposit");
        Ok(())
    }

    /// Look up an account by ID
    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts.get(account_id)
    }

    /// All accounts in registration order
    pub fn accounts(&self) -> &[Account] {
        self.accounts.all()
    }

    /// All payments in creation order
    pub fn payments(&self) -> &[Payment] {
        self.payments.as_slice()
    }

    /// All favorites in creation order
    pub fn favorites(&self) -> &[Favorite] {
        self.favorites.as_slice()
    }

    /// Merge an imported account: replace by ID in place, else append
    ///
    /// Appended accounts advance the ID allocator past their ID.
    pub fn merge_account(&mut self, account: Account) -> Result<Upsert, LedgerError> {
        let id = account.id;
        let outcome = self.accounts.upsert(account)?;
        self.ids.observe_account_id(id);
        Ok(outcome)
    }

    /// Merge an imported payment: replace by ID in place, else append
    pub fn merge_payment(&mut self, payment: Payment) -> Upsert {
        self.payments.upsert(payment)
    }

    /// Merge an imported favorite: replace by ID in place, else append
    pub fn merge_favorite(&mut self, favorite: Favorite) -> Upsert {
        self.favorites.upsert(favorite)
    }
}
