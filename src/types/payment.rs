//! Payment-related types for the wallet ledger

use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque payment identifier (a UUID string for payments created in-process)
pub type PaymentId = String;

/// Lifecycle state of a payment
///
/// A payment starts `InProgress` and may move to `Fail` exactly once, through
/// a rejection. There is no completed state: a payment that was never rejected
/// stays `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "INPROGRESS")]
    InProgress,

    #[serde(rename = "FAIL")]
    Fail,
}

impl PaymentStatus {
    /// Dump representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProgress => "INPROGRESS",
            PaymentStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A debit against an account
///
/// Field order matches the dump line format `id|accountID|amount|category|status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment identifier
    pub id: PaymentId,

    /// The account this payment was debited from
    pub account_id: AccountId,

    /// Debited amount (strictly positive for payments created in-process)
    pub amount: Money,

    /// Free-form category label
    pub category: String,

    /// Current lifecycle state
    pub status: PaymentStatus,
}
