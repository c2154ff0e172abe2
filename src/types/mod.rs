//! Types module
//!
//! Contains core data structures used throughout the ledger.
//! This module organizes types into logical submodules:
//! - `account`: Account record and identifier aliases
//! - `payment`: Payment record and status
//! - `favorite`: Saved payment templates
//! - `error`: Error type for every ledger operation

pub mod account;
pub mod error;
pub mod favorite;
pub mod payment;

pub use account::{Account, AccountId, Money};
pub use error::LedgerError;
pub use favorite::{Favorite, FavoriteId};
pub use payment::{Payment, PaymentId, PaymentStatus};
