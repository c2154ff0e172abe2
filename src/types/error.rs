//! Error types for the wallet ledger
//!
//! This module defines every error a ledger operation can return.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: account, payment or favorite not found
//! - **Validation Errors**: duplicate phone, non-positive amount, bad shard size
//! - **Arithmetic Errors**: balance overflow in either direction, account IDs exhausted
//! - **I/O Errors**: file open/read/write failures, dump parse failures, runtime failures

use super::account::{AccountId, Money};
use thiserror::Error;

/// Main error type for the wallet ledger
///
/// Every variant is returned to the immediate caller. A failed single-entity
/// operation leaves the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account with the given ID
    #[error("Account {account_id} not found")]
    AccountNotFound {
        /// The account ID that was looked up
        account_id: AccountId,
    },

    /// Another account already uses this phone
    #[error("Phone {phone} is already registered")]
    PhoneAlreadyRegistered {
        /// The duplicated phone
        phone: String,
    },

    /// Deposits and payments require a strictly positive amount
    #[error("Amount must be greater than zero, got {amount}")]
    AmountMustBePositive {
        /// The rejected amount
        amount: Money,
    },

    /// No payment with the given ID
    #[error("Payment {payment_id} not found")]
    PaymentNotFound {
        /// The payment ID that was looked up
        payment_id: String,
    },

    /// No favorite with the given ID
    #[error("Favorite {favorite_id} not found")]
    FavoriteNotFound {
        /// The favorite ID that was looked up
        favorite_id: String,
    },

    /// A balance update would leave the i64 range
    ///
    /// The update is rejected and the balance stays as it was.
    #[error("Balance overflow in {operation} for account {account_id}")]
    BalanceOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance was being updated
        account_id: AccountId,
    },

    /// Every account ID up to the maximum has been handed out or imported
    #[error("Account IDs exhausted after {last_account_id}")]
    AccountIdsExhausted {
        /// Highest account ID in use
        last_account_id: AccountId,
    },

    /// History sharding needs room for at least one record per file
    #[error("Records per file must be at least 1, got {records_per_file}")]
    InvalidRecordsPerFile {
        /// The rejected shard size
        records_per_file: usize,
    },

    /// I/O error occurred while reading or writing dump files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A dump record could not be parsed
    ///
    /// Directory imports log and skip these per line; the legacy import
    /// returns them.
    #[error("Dump parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line (record) number where the error occurred, if known
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The aggregation runtime could not be built or a task failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the runtime or task failure
        message: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(_) = error.kind() {
            return LedgerError::IoError {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for LedgerError {
    fn from(error: tokio::task::JoinError) -> Self {
        LedgerError::RuntimeError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: AccountId) -> Self {
        LedgerError::AccountNotFound { account_id }
    }

    /// Create a PhoneAlreadyRegistered error
    pub fn phone_already_registered(phone: &str) -> Self {
        LedgerError::PhoneAlreadyRegistered {
            phone: phone.to_string(),
        }
    }

    /// Create an AmountMustBePositive error
    pub fn amount_must_be_positive(amount: Money) -> Self {
        LedgerError::AmountMustBePositive { amount }
    }

    /// Create a PaymentNotFound error
    pub fn payment_not_found(payment_id: &str) -> Self {
        LedgerError::PaymentNotFound {
            payment_id: payment_id.to_string(),
        }
    }

    /// Create a FavoriteNotFound error
    pub fn favorite_not_found(favorite_id: &str) -> Self {
        LedgerError::FavoriteNotFound {
            favorite_id: favorite_id.to_string(),
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(operation: &str, account_id: AccountId) -> Self {
        LedgerError::BalanceOverflow {
            operation: operation.to_string(),
            account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::account_not_found(LedgerError::account_not_found(7), "Account 7 not found")]
    #[case::phone_registered(
        LedgerError::phone_already_registered("+992000000001"),
        "Phone +992000000001 is already registered"
    )]
    #[case::amount(
        LedgerError::amount_must_be_positive(-5),
        "Amount must be greater than zero, got -5"
    )]
    #[case::payment_not_found(LedgerError::payment_not_found("abc"), "Payment abc not found")]
    #[case::favorite_not_found(LedgerError::favorite_not_found("xyz"), "Favorite xyz not found")]
    #[case::overflow(
        LedgerError::balance_overflow("deposit", 3),
        "Balance overflow in deposit for account 3"
    )]
    #[case::ids_exhausted(
        LedgerError::AccountIdsExhausted { last_account_id: i64::MAX },
        "Account IDs exhausted after 9223372036854775807"
    )]
    #[case::records_per_file(
        LedgerError::InvalidRecordsPerFile { records_per_file: 0 },
        "Records per file must be at least 1, got 0"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(4), message: "bad field".to_string() },
        "Dump parse error at line 4: bad field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "bad field".to_string() },
        "Dump parse error: bad field"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_csv_deserialize_error_becomes_parse_error() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("not-a-number\n".as_bytes());
        let err = reader.deserialize::<(i64,)>().next().unwrap().unwrap_err();

        let error: LedgerError = err.into();
        assert!(matches!(error, LedgerError::ParseError { line: Some(1), .. }));
    }
}
