//! Per-account payment history

use crate::core::ledger::Ledger;
use crate::types::{AccountId, LedgerError, Payment};

/// Borrowing iterator over one account's payments, in ledger order
///
/// Cheap to clone; each clone restarts from where the original stood.
#[derive(Debug, Clone)]
pub struct AccountHistory<'a> {
    account_id: AccountId,
    payments: std::slice::Iter<'a, Payment>,
}

impl<'a> Iterator for AccountHistory<'a> {
    type Item = &'a Payment;

    fn next(&mut self) -> Option<Self::Item> {
        let account_id = self.account_id;
        self.payments.find(|payment| payment.account_id == account_id)
    }
}

impl Ledger {
    /// Iterate over an account's payments without copying them
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn account_history(&self, account_id: AccountId) -> Result<AccountHistory<'_>, LedgerError> {
        self.find_account_by_id(account_id)?;

        Ok(AccountHistory {
            account_id,
            payments: self.payments().iter(),
        })
    }

    /// Snapshot of an account's payments, in ledger order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn export_account_history(&self, account_id: AccountId) -> Result<Vec<Payment>, LedgerError> {
        Ok(self.account_history(account_id)?.cloned().collect())
    }
}
