use crate::core::AggregateConfig;
use crate::types::AccountId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect, convert and shard wallet ledger dumps
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Inspect, convert and shard wallet ledger dumps", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Number of parts payments are split into for aggregation
    #[arg(
        long = "parts",
        value_name = "COUNT",
        global = true,
        help = "Number of parts for parallel aggregation (default: CPU cores)"
    )]
    pub parts: Option<usize>,

    /// Worker threads of the aggregation runtime
    #[arg(
        long = "workers",
        value_name = "COUNT",
        global = true,
        help = "Worker threads for parallel aggregation (default: CPU cores)"
    )]
    pub workers: Option<usize>,
}

/// Available maintenance commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Import a dump directory and print a summary
    Inspect {
        /// Dump directory to read
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Write one account's payment history into shard files
    History {
        /// Dump directory to read
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Account whose payments are written
        #[arg(long = "account", value_name = "ID")]
        account: AccountId,

        /// Directory receiving the shard files
        #[arg(long = "out", value_name = "DIR")]
        out: PathBuf,

        /// Maximum number of payments per shard file
        #[arg(long = "records-per-file", value_name = "N")]
        records_per_file: usize,
    },

    /// Convert a legacy account file into a dump directory
    ConvertLegacy {
        /// Legacy account file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dump directory to write
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

impl CliArgs {
    /// Create an AggregateConfig from CLI arguments
    ///
    /// Missing values take the defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_aggregate_config(&self) -> AggregateConfig {
        if self.parts.is_some() || self.workers.is_some() {
            let default = AggregateConfig::default();
            AggregateConfig::new(
                self.parts.unwrap_or(default.parts),
                self.workers.unwrap_or(default.worker_threads),
            )
        } else {
            AggregateConfig::default()
        }
    }
}
