//! Legacy single-file account dump
//!
//! Older dumps store only accounts, as `id;phone;balance` records each
//! terminated by `|`, with no newlines:
//!
//! ```text
//! 1;+992000000001;100|2;+992000000002;0|
//! ```
//!
//! Unlike the directory dump, the legacy import is strict: one malformed
//! record aborts the whole import before anything is merged.

use crate::core::Ledger;
use crate::io::directory::MergeStats;
use crate::io::dump_format::{collect_strict, delimited_reader, delimited_writer};
use crate::types::{Account, LedgerError};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Field separator of the legacy dump
pub const LEGACY_FIELD_DELIMITER: u8 = b';';

/// Record terminator of the legacy dump
pub const LEGACY_RECORD_TERMINATOR: u8 = b'|';

/// Write accounts in the legacy format
pub fn write_legacy_accounts<W: Write>(accounts: &[Account], output: W) -> Result<(), LedgerError> {
    let mut writer = delimited_writer(output, LEGACY_FIELD_DELIMITER, LEGACY_RECORD_TERMINATOR);

    for account in accounts {
        writer.serialize(account)?;
    }

    writer.flush()?;
    Ok(())
}

/// Parse accounts in the legacy format
///
/// Trailing whitespace after the last record (such as a final newline) is
/// ignored.
///
/// # Errors
///
/// Returns `ParseError` on the first malformed record, or `IoError` if the
/// input cannot be read.
pub fn read_legacy_accounts<R: Read>(mut input: R) -> Result<Vec<Account>, LedgerError> {
    let mut content = Vec::new();
    input.read_to_end(&mut content)?;

    let end = content
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(0, |last| last + 1);

    let mut reader =
        delimited_reader(&content[..end], LEGACY_FIELD_DELIMITER, LEGACY_RECORD_TERMINATOR);
    collect_strict(&mut reader)
}

impl Ledger {
    /// Write every account to a single legacy dump file, overwriting it
    pub fn export_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        let file = File::create(path)?;
        write_legacy_accounts(self.accounts(), BufWriter::new(file))?;

        info!(path = %path.display(), accounts = self.accounts().len(), "exported legacy dump");
        Ok(())
    }

    /// Merge accounts from a legacy dump file
    ///
    /// Accounts replace the ones with the same ID or are appended. An account
    /// whose phone belongs to a different account is skipped.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be opened or read, or
    /// `ParseError` if any record is malformed. The ledger is unchanged on
    /// error.
    pub fn import_from_file(&mut self, path: &Path) -> Result<MergeStats, LedgerError> {
        let file = File::open(path)?;
        let accounts = read_legacy_accounts(file)?;

        let mut stats = MergeStats::default();
        for account in accounts {
            let id = account.id;
            match self.merge_account(account) {
                Ok(outcome) => stats.record(outcome),
                Err(err) => {
                    warn!(account_id = id, error = %err, "skipping legacy account");
                    stats.skipped += 1;
                }
            }
        }

        info!(path = %path.display(), ?stats, "imported legacy dump");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                id: 1,
                phone: "123".to_string(),
                balance: 0,
            },
            Account {
                id: 2,
                phone: "321".to_string(),
                balance: 10,
            },
        ]
    }

    #[test]
    fn test_write_legacy_format() {
        let mut output = Vec::new();

        write_legacy_accounts(&accounts(), &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "1;123;0|2;321;10|");
    }

    #[test]
    fn test_read_legacy_format() {
        let parsed = read_legacy_accounts("1;123;0|2;321;10|".as_bytes()).unwrap();

        assert_eq!(parsed, accounts());
    }

    #[rstest]
    #[case::trailing_newline("1;123;0|2;321;10|\n")]
    #[case::trailing_crlf("1;123;0|2;321;10|\r\n")]
    #[case::trailing_spaces("1;123;0|2;321;10|  \n\n")]
    fn test_read_legacy_ignores_trailing_whitespace(#[case] input: &str) {
        let parsed = read_legacy_accounts(input.as_bytes()).unwrap();

        assert_eq!(parsed, accounts());
    }

    #[test]
    fn test_import_file_ending_in_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accounts.legacy");
        std::fs::write(&path, "1;111;5|2;222;0|\n").unwrap();
        let mut ledger = Ledger::new();

        let stats = ledger.import_from_file(&path).unwrap();

        assert_eq!(stats.inserted, 2);
        assert_eq!(ledger.find_account_by_id(1).unwrap().balance, 5);
    }

    #[test]
    fn test_read_legacy_malformed_record_fails() {
        let result = read_legacy_accounts("1;123;0|2;321;ten|".as_bytes());

        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_export_then_import_into_fresh_ledger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accounts.legacy");
        let mut source = Ledger::new();
        let account = source.register_account("123").unwrap();
        source.deposit(account.id, 75).unwrap();
        source.register_account("321").unwrap();

        source.export_to_file(&path).unwrap();
        let mut target = Ledger::new();
        let stats = target.import_from_file(&path).unwrap();

        assert_eq!(stats.inserted, 2);
        assert_eq!(target.accounts(), source.accounts());
        assert_eq!(target.register_account("999").unwrap().id, 3);
    }

    #[test]
    fn test_import_malformed_file_leaves_ledger_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accounts.legacy");
        std::fs::write(&path, "5;555;0|oops|").unwrap();
        let mut ledger = Ledger::new();
        ledger.register_account("123").unwrap();

        let result = ledger.import_from_file(&path);

        assert!(result.is_err());
        assert_eq!(ledger.accounts().len(), 1);
    }

    #[test]
    fn test_import_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new();

        let result = ledger.import_from_file(&dir.path().join("nope"));

        assert!(matches!(result, Err(LedgerError::IoError { .. })));
    }
}
