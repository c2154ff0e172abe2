//! History sharding
//!
//! Splits an ordered list of payments into files of at most
//! `records_per_file` records each, in the `payments.dump` line format.
//!
//! ```text
//! n <= records_per_file   ->  payments.dump
//! n >  records_per_file   ->  payments1.dump, payments2.dump, ... paymentsK.dump
//!                             K = ceil(n / records_per_file)
//! ```
//!
//! Chunks are consecutive and keep the input order; only the last file may
//! hold fewer than `records_per_file` records.

use crate::io::dump_format::{write_records, DumpRecord};
use crate::types::{LedgerError, Payment};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the `index`-th shard (one-based), or of the single file
pub fn shard_file_name(index: Option<usize>) -> String {
    match index {
        None => Payment::FILE_NAME.to_string(),
        Some(index) => format!("payments{}.dump", index),
    }
}

/// Write payments into one or more shard files under `dir`
///
/// Returns the written paths in shard order. An empty payment list writes
/// nothing.
///
/// # Errors
///
/// Returns an error if:
/// - `records_per_file` is zero
/// - A shard file cannot be written (earlier shards stay on disk)
pub fn history_to_files(
    payments: &[Payment],
    dir: &Path,
    records_per_file: usize,
) -> Result<Vec<PathBuf>, LedgerError> {
    if records_per_file == 0 {
        return Err(LedgerError::InvalidRecordsPerFile { records_per_file });
    }
    if payments.is_empty() {
        debug!(dir = %dir.display(), "empty history, nothing to write");
        return Ok(Vec::new());
    }

    let single = payments.len() <= records_per_file;
    let mut written = Vec::with_capacity(payments.len().div_ceil(records_per_file));

    for (index, chunk) in payments.chunks(records_per_file).enumerate() {
        let name = if single {
            shard_file_name(None)
        } else {
            shard_file_name(Some(index + 1))
        };
        let path = dir.join(name);

        let file = File::create(&path)?;
        write_records(chunk, BufWriter::new(file))?;

        debug!(path = %path.display(), records = chunk.len(), "wrote history shard");
        written.push(path);
    }

    info!(
        dir = %dir.display(),
        payments = payments.len(),
        files = written.len(),
        "wrote payment history"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dump_format::{read_records, ParsedRecords};
    use crate::types::PaymentStatus;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn payments(count: usize) -> Vec<Payment> {
        (0..count)
            .map(|i| Payment {
                id: format!("p{}", i),
                account_id: 1,
                amount: 100 + i as i64,
                category: "auto".to_string(),
                status: PaymentStatus::InProgress,
            })
            .collect()
    }

    fn read_shard(path: &Path) -> Vec<Payment> {
        let parsed: ParsedRecords<Payment> = read_records(File::open(path).unwrap()).unwrap();
        parsed.records
    }

    #[test]
    fn test_ten_payments_three_per_file() {
        let dir = TempDir::new().unwrap();
        let history = payments(10);

        let written = history_to_files(&history, dir.path(), 3).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["payments1.dump", "payments2.dump", "payments3.dump", "payments4.dump"]
        );

        let shards: Vec<Vec<Payment>> = written.iter().map(|p| read_shard(p)).collect();
        let sizes: Vec<usize> = shards.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert_eq!(shards.concat(), history);
        assert!(!dir.path().join("payments.dump").exists());
    }

    #[rstest]
    #[case::fewer_than_limit(2, 3)]
    #[case::exactly_limit(3, 3)]
    fn test_single_file_when_everything_fits(#[case] count: usize, #[case] per_file: usize) {
        let dir = TempDir::new().unwrap();
        let history = payments(count);

        let written = history_to_files(&history, dir.path(), per_file).unwrap();

        assert_eq!(written, vec![dir.path().join("payments.dump")]);
        assert_eq!(read_shard(&written[0]), history);
        assert!(!dir.path().join("payments1.dump").exists());
    }

    #[rstest]
    #[case(4, 2, 2)]
    #[case(5, 2, 3)]
    #[case(7, 1, 7)]
    fn test_file_count_is_ceiling(#[case] count: usize, #[case] per_file: usize, #[case] files: usize) {
        let dir = TempDir::new().unwrap();

        let written = history_to_files(&payments(count), dir.path(), per_file).unwrap();

        assert_eq!(written.len(), files);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), files);
    }

    #[test]
    fn test_empty_history_writes_nothing() {
        let dir = TempDir::new().unwrap();

        let written = history_to_files(&[], dir.path(), 3).unwrap();

        assert!(written.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_zero_records_per_file_is_rejected() {
        let dir = TempDir::new().unwrap();

        let result = history_to_files(&payments(3), dir.path(), 0);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::InvalidRecordsPerFile { records_per_file: 0 }
        );
    }
}
