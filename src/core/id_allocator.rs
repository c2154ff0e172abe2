//! Identifier allocation
//!
//! Account IDs are sequential integers starting at 1. Payment and favorite
//! IDs are random UUID v4 strings, fresh on every creation.

use crate::types::{AccountId, LedgerError};
use uuid::Uuid;

/// Produces unique identifiers for ledger records
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    /// Highest account ID handed out or observed so far
    last_account_id: AccountId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next sequential account ID
    ///
    /// # Errors
    ///
    /// Returns `AccountIdsExhausted` once the highest ID is `AccountId::MAX`;
    /// the sequence is left unchanged.
    pub fn next_account_id(&mut self) -> Result<AccountId, LedgerError> {
        let next = self
            .last_account_id
            .checked_add(1)
            .ok_or(LedgerError::AccountIdsExhausted {
                last_account_id: self.last_account_id,
            })?;
        self.last_account_id = next;
        Ok(next)
    }

    /// Record an account ID that entered the ledger from outside (import)
    ///
    /// Later allocations continue past it, so an imported ID is never handed
    /// out again.
    pub fn observe_account_id(&mut self, id: AccountId) {
        self.last_account_id = self.last_account_id.max(id);
    }

    /// Generate a fresh opaque payment or favorite identifier
    pub fn next_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
