//! Account registry module
//!
//! This module provides the `AccountRegistry` struct which owns every account
//! in the ledger and is the only place balances change.
//!
//! The AccountRegistry is responsible for:
//! - Registering accounts with a unique phone
//! - Looking accounts up by ID
//! - Crediting and debiting balances with checked arithmetic
//! - Merging imported accounts while keeping phones unique

use crate::core::record_store::{RecordStore, Upsert};
use crate::types::{Account, AccountId, LedgerError, Money};
use std::collections::HashMap;

/// Owns all accounts and their balances
///
/// Accounts are kept in registration order. A secondary phone index makes
/// the uniqueness check O(1).
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    /// Accounts in registration order, indexed by ID
    accounts: RecordStore<Account>,
    /// Map of phone to the account that owns it
    phones: HashMap<String, AccountId>,
}

impl AccountRegistry {
    /// Create a new AccountRegistry with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account under an already-allocated ID
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if any account already uses `phone`.
    pub fn register(&mut self, id: AccountId, phone: &str) -> Result<&Account, LedgerError> {
        if self.phones.contains_key(phone) {
            return Err(LedgerError::phone_already_registered(phone));
        }

        self.phones.insert(phone.to_string(), id);
        Ok(self.accounts.insert(Account::new(id, phone)))
    }

    /// Whether an account uses this phone
    pub fn is_phone_registered(&self, phone: &str) -> bool {
        self.phones.contains_key(phone)
    }

    /// Look up an account by ID
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has this ID.
    pub fn get(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.contains(&id)
    }

    /// Increase an account balance
    ///
    /// Uses checked arithmetic; on overflow the balance is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account has this ID
    /// - Adding `amount` would overflow the balance
    pub fn credit(
        &mut self,
        id: AccountId,
        amount: Money,
        operation: &str,
    ) -> Result<Money, LedgerError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::balance_overflow(operation, id))?;

        Ok(account.balance)
    }

    /// Decrease an account balance
    ///
    /// No funds check: the balance may go negative. Uses checked arithmetic;
    /// on overflow the balance is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account has this ID
    /// - Subtracting `amount` would overflow the balance
    pub fn debit(
        &mut self,
        id: AccountId,
        amount: Money,
        operation: &str,
    ) -> Result<Money, LedgerError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::balance_overflow(operation, id))?;

        Ok(account.balance)
    }

    /// Merge an account loaded from a dump
    ///
    /// Replaces the account with the same ID in place, or appends it. The
    /// phone index follows the replacement.
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if the phone belongs to a different
    /// account. The registry is unchanged in that case.
    pub fn upsert(&mut self, account: Account) -> Result<Upsert, LedgerError> {
        if let Some(&owner) = self.phones.get(&account.phone) {
            if owner != account.id {
                return Err(LedgerError::phone_already_registered(&account.phone));
            }
        }

        if let Some(previous) = self.accounts.get(&account.id) {
            if previous.phone != account.phone {
                self.phones.remove(&previous.phone);
            }
        }
        self.phones.insert(account.phone.clone(), account.id);

        Ok(self.accounts.upsert(account))
    }

    /// All accounts in registration order
    pub fn all(&self) -> &[Account] {
        self.accounts.as_slice()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
