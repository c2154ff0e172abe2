//! Maintenance command execution
//!
//! Each command loads a fresh [`Ledger`] from disk, does its work and writes
//! a short human-readable report to the given output.

use crate::cli::args::{CliArgs, Command};
use crate::core::{AggregateRunner, Ledger};
use crate::io::{history_to_files, ImportReport};
use crate::types::{AccountId, LedgerError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Run the command selected by `args`, writing its report to `output`
///
/// # Errors
///
/// Returns the first `LedgerError` raised by the command.
pub fn run<W: Write>(args: &CliArgs, output: &mut W) -> Result<(), LedgerError> {
    match &args.command {
        Command::Inspect { dir } => {
            let runner = AggregateRunner::new(args.to_aggregate_config())?;
            inspect(dir, &runner, output)
        }
        Command::History {
            dir,
            account,
            out,
            records_per_file,
        } => history(dir, *account, out, *records_per_file, output),
        Command::ConvertLegacy { file, dir } => convert_legacy(file, dir, output),
    }
}

/// Import a dump directory into a fresh ledger
///
/// Missing dump files inside `dir` are skipped, but `dir` itself must exist.
fn load_dump(dir: &Path) -> Result<(Ledger, ImportReport), LedgerError> {
    if !dir.is_dir() {
        return Err(LedgerError::IoError {
            message: format!("{} is not a directory", dir.display()),
        });
    }

    let mut ledger = Ledger::new();
    let report = ledger.import(dir)?;
    Ok((ledger, report))
}

fn inspect<W: Write>(dir: &Path, runner: &AggregateRunner, output: &mut W) -> Result<(), LedgerError> {
    let (ledger, report) = load_dump(dir)?;
    let total = runner.sum_payments(&ledger)?;

    writeln!(output, "accounts: {}", ledger.accounts().len())?;
    writeln!(output, "payments: {}", ledger.payments().len())?;
    writeln!(output, "favorites: {}", ledger.favorites().len())?;
    writeln!(
        output,
        "skipped lines: {}",
        report.accounts.skipped + report.payments.skipped + report.favorites.skipped
    )?;
    writeln!(output, "payment total: {}", total)?;
    Ok(())
}

fn history<W: Write>(
    dir: &Path,
    account_id: AccountId,
    out: &Path,
    records_per_file: usize,
    output: &mut W,
) -> Result<(), LedgerError> {
    let (ledger, _) = load_dump(dir)?;
    let payments = ledger.export_account_history(account_id)?;

    fs::create_dir_all(out)?;
    let written = history_to_files(&payments, out, records_per_file)?;

    for path in &written {
        writeln!(output, "{}", path.display())?;
    }
    info!(account_id, files = written.len(), "history command finished");
    Ok(())
}

fn convert_legacy<W: Write>(file: &Path, dir: &Path, output: &mut W) -> Result<(), LedgerError> {
    let mut ledger = Ledger::new();
    let stats = ledger.import_from_file(file)?;

    fs::create_dir_all(dir)?;
    ledger.export(dir)?;

    writeln!(
        output,
        "converted {} accounts ({} skipped)",
        ledger.accounts().len(),
        stats.skipped
    )?;
    Ok(())
}
