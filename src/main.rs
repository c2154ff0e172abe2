//! Wallet Ledger CLI
//!
//! Maintenance commands over ledger dumps.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- inspect ./dump
//! cargo run -- --parts 8 --workers 4 inspect ./dump
//! cargo run -- history ./dump --account 1 --out ./shards --records-per-file 100
//! cargo run -- convert-legacy accounts.legacy ./dump
//! ```
//!
//! Reports go to stdout; logs go to stderr and follow `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing directory, unreadable file, unknown account, etc.)

use std::process;
use wallet_ledger::{cli, logging};

fn main() {
    logging::init_tracing();

    let args = cli::parse_args();

    let mut output = std::io::stdout().lock();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
