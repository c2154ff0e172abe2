//! Wallet Ledger Library
//! # Overview
//!
//! This library provides an in-memory wallet ledger with pipe-delimited dump
//! persistence, per-account history export and parallel aggregation.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Payment, Favorite, LedgerError)
//! - [`cli`] - Maintenance CLI arguments and commands
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Accounts, deposits and identifier allocation
//!   - [`core::payments`] - Pay, reject and repeat
//!   - [`core::favorites`] - Saved payment templates
//!   - [`core::history`] - Per-account payment history
//!   - [`core::aggregate`] - Parallel sums and filters
//!   - [`core::shared`] - Thread-safe ledger handle
//! - [`io`] - Dump directory, legacy file and history shard files
//! - [`logging`] - Tracing subscriber setup
//!
//! # Payment Lifecycle
//!
//! - **Pay**: Debit the account and record an `INPROGRESS` payment
//! - **Reject**: Mark the payment `FAIL` and credit its amount back
//! - **Repeat**: Record a new payment with the same fields and debit again
//! - **Pay from favorite**: Pay using a saved template's fields
//!
//! # Balances
//!
//! Balances are signed integers in minor units. Payments are not checked
//! against the balance, so an account may go negative.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod types;

pub use crate::core::{AggregateConfig, AggregateRunner, Ledger, Progress, SharedLedger};
pub use io::{history_to_files, ImportReport, MergeStats};
pub use types::{
    Account, AccountId, Favorite, FavoriteId, LedgerError, Money, Payment, PaymentId, PaymentStatus,
};
