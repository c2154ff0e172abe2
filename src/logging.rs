//! Tracing setup
//!
//! Log output goes to stderr so stdout stays free for command output.
//! `RUST_LOG` overrides the default filter, e.g.
//!
//! ```text
//! RUST_LOG=wallet_ledger=debug wallet-ledger inspect ./dump
//! ```

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "wallet_ledger=info";

static TRACING_INIT: Once = Once::new();

/// Install the global fmt subscriber
///
/// Safe to call more than once; only the first call has any effect, and a
/// subscriber installed elsewhere is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}
