//! Account-related types for the wallet ledger
//!
//! This module defines the Account structure along with the identifier
//! and money aliases shared by every other record type.

use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Assigned monotonically starting at 1, never reused.
pub type AccountId = i64;

/// Signed amount of minor currency units
pub type Money = i64;

/// Client account state
///
/// Field order matches the dump line format `id|phone|balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Ledger-assigned identifier
    pub id: AccountId,

    /// Phone number, unique across all accounts
    pub phone: String,

    /// Current balance
    ///
    /// Payments debit immediately without a funds check, so this may go negative.
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: AccountId, phone: impl Into<String>) -> Self {
        Account {
            id,
            phone: phone.into(),
            balance: 0,
        }
    }
}
