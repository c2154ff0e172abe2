//! Directory dump: one file per record kind
//!
//! A dump directory holds up to three files:
//!
//! ```text
//! accounts.dump    id|phone|balance
//! payments.dump    id|accountID|amount|category|status
//! favorites.dump   id|accountID|name|amount|category
//! ```
//!
//! # Export
//!
//! Each non-empty collection overwrites its file. An empty collection
//! writes nothing, and a file left over from an earlier export stays.
//!
//! # Import
//!
//! Files are processed accounts, payments, favorites, stopping at the first
//! I/O error. A missing file is skipped. Within a file, every record
//! replaces the in-memory record with the same ID or is appended; a line
//! that fails to parse is logged and skipped.

use crate::core::record_store::Upsert;
use crate::core::Ledger;
use crate::io::dump_format::{read_records, write_records, DumpRecord, ParsedRecords};
use crate::types::{Account, Favorite, LedgerError, Payment};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-collection merge counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records appended as new
    pub inserted: usize,
    /// Records that replaced an existing record with the same ID
    pub replaced: usize,
    /// Lines that failed to parse or records that were refused
    pub skipped: usize,
}

impl MergeStats {
    pub(crate) fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Replaced => self.replaced += 1,
        }
    }
}

/// Result of importing a dump directory
///
/// A collection whose file was missing reports all-zero stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub accounts: MergeStats,
    pub payments: MergeStats,
    pub favorites: MergeStats,
}

/// Write one collection to its dump file
///
/// Returns the written path, or `None` when the collection is empty.
fn export_collection<T: DumpRecord>(records: &[T], dir: &Path) -> Result<Option<PathBuf>, LedgerError> {
    if records.is_empty() {
        debug!(kind = T::KIND, "nothing to export");
        return Ok(None);
    }

    let path = dir.join(T::FILE_NAME);
    let file = File::create(&path)?;
    write_records(records, BufWriter::new(file))?;

    debug!(kind = T::KIND, path = %path.display(), count = records.len(), "exported collection");
    Ok(Some(path))
}

/// Read one collection's dump file
///
/// Returns `None` when the file does not exist.
fn load_collection<T: DumpRecord>(dir: &Path) -> Result<Option<ParsedRecords<T>>, LedgerError> {
    let path = dir.join(T::FILE_NAME);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(kind = T::KIND, path = %path.display(), "dump file missing, skipping");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    read_records(BufReader::new(file)).map(Some)
}

/// Load a collection and merge each record with `merge`
///
/// Records refused by `merge` are logged and counted as skipped.
fn import_collection<T, F>(dir: &Path, mut merge: F) -> Result<MergeStats, LedgerError>
where
    T: DumpRecord,
    F: FnMut(T) -> Result<Upsert, LedgerError>,
{
    let Some(parsed) = load_collection::<T>(dir)? else {
        return Ok(MergeStats::default());
    };

    let mut stats = MergeStats {
        skipped: parsed.skipped,
        ..MergeStats::default()
    };

    for record in parsed.records {
        match merge(record) {
            Ok(outcome) => stats.record(outcome),
            Err(err) => {
                warn!(kind = T::KIND, error = %err, "skipping refused record");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

impl Ledger {
    /// Write every non-empty collection to `dir`
    ///
    /// # Errors
    ///
    /// Returns `IoError` on the first file that cannot be written; later
    /// collections are not attempted.
    pub fn export(&self, dir: &Path) -> Result<(), LedgerError> {
        export_collection::<Account>(self.accounts(), dir)?;
        export_collection::<Payment>(self.payments(), dir)?;
        export_collection::<Favorite>(self.favorites(), dir)?;

        info!(
            dir = %dir.display(),
            accounts = self.accounts().len(),
            payments = self.payments().len(),
            favorites = self.favorites().len(),
            "exported ledger"
        );
        Ok(())
    }

    /// Merge the dump files found in `dir`
    ///
    /// # Errors
    ///
    /// Returns `IoError` on the first file that exists but cannot be read;
    /// collections already merged stay merged and later files are not
    /// attempted.
    pub fn import(&mut self, dir: &Path) -> Result<ImportReport, LedgerError> {
        let accounts = import_collection::<Account, _>(dir, |account| self.merge_account(account))?;
        let payments = import_collection::<Payment, _>(dir, |payment| Ok(self.merge_payment(payment)))?;
        let favorites =
            import_collection::<Favorite, _>(dir, |favorite| Ok(self.merge_favorite(favorite)))?;

        let report = ImportReport {
            accounts,
            payments,
            favorites,
        };
        info!(dir = %dir.display(), ?report, "imported ledger");
        Ok(report)
    }
}
