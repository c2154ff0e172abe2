//! Parallel aggregation over payments
//!
//! This module sums and filters the payment list by splitting it into
//! contiguous parts and processing each part in its own tokio task.
//!
//! # Design
//!
//! The payment list is copied once into an `Arc<[Payment]>` snapshot, so
//! tasks share it without holding any ledger borrow or lock. Parts are
//! contiguous ranges and results are joined in part order, which keeps
//! filter output in ledger order.
//!
//! # Architecture
//!
//! ```text
//! AggregateRunner
//!     ├── AggregateConfig (parts, worker_threads)
//!     ├── tokio multi-thread Runtime
//!     └── async functions (sum_payments, filter_payments_by, sum_with_progress)
//!             └── one task per part over the shared snapshot
//! ```

use crate::core::ledger::Ledger;
use crate::types::{AccountId, LedgerError, Money, Payment};
use futures::future::try_join_all;
use std::ops::Range;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Payments per part when reporting progress
pub const DEFAULT_PROGRESS_PART_SIZE: usize = 100_000;

/// Configuration for parallel aggregation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateConfig {
    /// Number of parts the payment list is split into
    pub parts: usize,
    /// Worker threads of the aggregation runtime
    pub worker_threads: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            parts: num_cpus::get(),
            worker_threads: num_cpus::get(),
        }
    }
}

impl AggregateConfig {
    /// Create an AggregateConfig with custom values
    ///
    /// Zero values fall back to the defaults.
    pub fn new(parts: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let parts = if parts == 0 {
            warn!(parts, default = default.parts, "invalid part count, using default");
            default.parts
        } else {
            parts
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                worker_threads,
                default = default.worker_threads,
                "invalid worker thread count, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            parts,
            worker_threads,
        }
    }
}

/// Summary of one processed part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of payments in the part
    pub part: usize,
    /// Sum of their amounts
    pub result: Money,
}

/// Split `0..len` into at most `parts` contiguous ranges of near-equal size
///
/// Every index appears in exactly one range, in order. `parts <= 1` yields a
/// single range; an empty list yields none.
pub fn split_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }

    let size = len.div_ceil(parts.clamp(1, len));
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Sum of amounts, saturating at the `Money` bounds
fn sum_amounts(payments: &[Payment]) -> Money {
    payments
        .iter()
        .fold(0, |total: Money, payment| total.saturating_add(payment.amount))
}

/// Sum all payment amounts using one task per part
///
/// Must run inside a tokio runtime.
pub async fn sum_payments(payments: Arc<[Payment]>, parts: usize) -> Result<Money, LedgerError> {
    let tasks = split_ranges(payments.len(), parts).into_iter().map(|range| {
        let payments = Arc::clone(&payments);
        tokio::spawn(async move { sum_amounts(&payments[range]) })
    });

    let sums = try_join_all(tasks).await?;
    Ok(sums
        .into_iter()
        .fold(0, |total: Money, part| total.saturating_add(part)))
}

/// Keep the payments matching `predicate`, in their original order
///
/// Must run inside a tokio runtime.
pub async fn filter_payments_by<F>(
    payments: Arc<[Payment]>,
    parts: usize,
    predicate: F,
) -> Result<Vec<Payment>, LedgerError>
where
    F: Fn(&Payment) -> bool + Send + Sync + 'static,
{
    let predicate = Arc::new(predicate);

    let tasks = split_ranges(payments.len(), parts).into_iter().map(|range| {
        let payments = Arc::clone(&payments);
        let predicate = Arc::clone(&predicate);
        tokio::spawn(async move {
            payments[range]
                .iter()
                .filter(|&payment| predicate(payment))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let matched = try_join_all(tasks).await?;
    Ok(matched.concat())
}

/// Sum payments in parts of `part_size`, reporting each part as it finishes
///
/// The receiver yields one [`Progress`] per part, in completion order, and
/// closes after the last one. Must be called inside a tokio runtime.
pub fn sum_with_progress(payments: Arc<[Payment]>, part_size: usize) -> mpsc::Receiver<Progress> {
    let part_size = if part_size == 0 {
        warn!(default = DEFAULT_PROGRESS_PART_SIZE, "invalid part size, using default");
        DEFAULT_PROGRESS_PART_SIZE
    } else {
        part_size
    };

    let ranges: Vec<Range<usize>> = (0..payments.len())
        .step_by(part_size)
        .map(|start| start..(start + part_size).min(payments.len()))
        .collect();
    let (sender, receiver) = mpsc::channel(ranges.len().max(1));

    for range in ranges {
        let payments = Arc::clone(&payments);
        let sender = sender.clone();
        tokio::spawn(async move {
            let progress = Progress {
                part: range.len(),
                result: sum_amounts(&payments[range]),
            };
            if sender.send(progress).await.is_err() {
                debug!("progress receiver dropped");
            }
        });
    }

    receiver
}

/// Blocking front end running aggregations on a private runtime
#[derive(Debug)]
pub struct AggregateRunner {
    config: AggregateConfig,
    runtime: Runtime,
}

impl AggregateRunner {
    /// Build the runner and its multi-thread runtime
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError` if the runtime cannot be created.
    pub fn new(config: AggregateConfig) -> Result<Self, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .build()
            .map_err(|e| LedgerError::RuntimeError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Total amount of every payment in the ledger
    pub fn sum_payments(&self, ledger: &Ledger) -> Result<Money, LedgerError> {
        let snapshot = ledger.payments_snapshot();
        self.runtime.block_on(sum_payments(snapshot, self.config.parts))
    }

    /// One account's payments, in ledger order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn filter_payments(
        &self,
        ledger: &Ledger,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError> {
        ledger.find_account_by_id(account_id)?;
        self.filter_payments_by(ledger, move |payment| payment.account_id == account_id)
    }

    /// Payments matching `predicate`, in ledger order
    pub fn filter_payments_by<F>(&self, ledger: &Ledger, predicate: F) -> Result<Vec<Payment>, LedgerError>
    where
        F: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let snapshot = ledger.payments_snapshot();
        self.runtime
            .block_on(filter_payments_by(snapshot, self.config.parts, predicate))
    }

    /// Start a progress-reporting sum over parts of `part_size` payments
    ///
    /// Drain the receiver with `blocking_recv` from synchronous code.
    pub fn sum_payments_with_progress(&self, ledger: &Ledger, part_size: usize) -> mpsc::Receiver<Progress> {
        let snapshot = ledger.payments_snapshot();
        let _guard = self.runtime.enter();
        sum_with_progress(snapshot, part_size)
    }
}

impl Ledger {
    /// Shared immutable copy of the payment list
    pub fn payments_snapshot(&self) -> Arc<[Payment]> {
        Arc::from(self.payments())
    }
}
