//! Core ledger module
//!
//! This module contains the in-memory ledger and its building blocks:
//! - `traits` - Keyed records shared by the stores
//! - `record_store` - Insertion-ordered storage with an ID index
//! - `id_allocator` - Account ID sequence and payment/favorite tokens
//! - `account_registry` - Accounts, phone uniqueness and balance arithmetic
//! - `ledger` - The ledger itself and account operations
//! - `payments` - Pay, reject and repeat
//! - `favorites` - Favorite templates and paying from them
//! - `history` - Per-account payment history
//! - `aggregate` - Parallel sums and filters over payments
//! - `shared` - Thread-safe handle over a ledger

pub mod account_registry;
pub mod aggregate;
pub mod favorites;
pub mod history;
pub mod id_allocator;
pub mod ledger;
pub mod payments;
pub mod record_store;
pub mod shared;
pub mod traits;

pub use account_registry::AccountRegistry;
pub use aggregate::{AggregateConfig, AggregateRunner, Progress, DEFAULT_PROGRESS_PART_SIZE};
pub use history::AccountHistory;
pub use id_allocator::IdAllocator;
pub use ledger::Ledger;
pub use record_store::{RecordStore, Upsert};
pub use shared::SharedLedger;
pub use traits::Keyed;
