//! I/O module
//!
//! Handles dump serialization and history export.
//!
//! # Components
//!
//! - `dump_format` - Line format shared by all dump files (`|`-delimited records)
//! - `directory` - Three-file dump directory export/import with merge semantics
//! - `legacy` - Single-file `;`/`|` account dump
//! - `history_files` - Splitting payment history across bounded-size files

pub mod directory;
pub mod dump_format;
pub mod history_files;
pub mod legacy;

pub use directory::{ImportReport, MergeStats};
pub use dump_format::{read_records, render_records, write_records, DumpRecord, ParsedRecords};
pub use history_files::{history_to_files, shard_file_name};
pub use legacy::{read_legacy_accounts, write_legacy_accounts};
