//! Dump format handling for ledger records
//!
//! This module centralizes the line format shared by every dump file:
//! - One record per line, fields separated by `|`, lines ending in `\n`
//! - No header, no quoting, no escaping (a value containing `|` corrupts its line)
//! - Field order follows the struct field order of each record type
//!
//! Reading is tolerant: a line that fails to parse is logged and skipped, while
//! an I/O failure aborts the read.

use crate::core::traits::Keyed;
use crate::types::{Account, Favorite, LedgerError, Payment};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::warn;

/// Field separator of the directory dump
pub const FIELD_DELIMITER: u8 = b'|';

/// Record terminator of the directory dump
pub const RECORD_TERMINATOR: u8 = b'\n';

/// A record type with its own dump file
pub trait DumpRecord: Keyed + Serialize + DeserializeOwned {
    /// File name inside a dump directory
    const FILE_NAME: &'static str;

    /// Human-readable collection name for logs
    const KIND: &'static str;
}

impl DumpRecord for Account {
    const FILE_NAME: &'static str = "accounts.dump";
    const KIND: &'static str = "accounts";
}

impl DumpRecord for Payment {
    const FILE_NAME: &'static str = "payments.dump";
    const KIND: &'static str = "payments";
}

impl DumpRecord for Favorite {
    const FILE_NAME: &'static str = "favorites.dump";
    const KIND: &'static str = "favorites";
}

/// Records parsed from a dump, with the count of lines that were skipped
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Build a writer for the given delimiters
///
/// Quoting is disabled so values are written verbatim.
pub(crate) fn delimited_writer<W: Write>(
    output: W,
    delimiter: u8,
    terminator: u8,
) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .terminator(Terminator::Any(terminator))
        .quote_style(QuoteStyle::Never)
        .from_writer(output)
}

/// Build a reader for the given delimiters
///
/// Records with the wrong number of fields are surfaced as per-record
/// deserialization errors rather than stopping the reader.
pub(crate) fn delimited_reader<R: Read>(input: R, delimiter: u8, terminator: u8) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .terminator(Terminator::Any(terminator))
        .quoting(false)
        .flexible(true)
        .buffer_capacity(8 * 1024)
        .from_reader(input)
}

/// Write records in the dump line format
///
/// # Errors
///
/// Returns `IoError` if the output cannot be written or flushed.
pub fn write_records<T: Serialize, W: Write>(records: &[T], output: W) -> Result<(), LedgerError> {
    let mut writer = delimited_writer(output, FIELD_DELIMITER, RECORD_TERMINATOR);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render records to a string in the dump line format
pub fn render_records<T: Serialize>(records: &[T]) -> Result<String, LedgerError> {
    let mut output = Vec::new();
    write_records(records, &mut output)?;
    String::from_utf8(output).map_err(|e| LedgerError::ParseError {
        line: None,
        message: e.to_string(),
    })
}

/// Read records in the dump line format, skipping malformed lines
///
/// # Errors
///
/// Returns `IoError` if the input cannot be read. Malformed lines never
/// produce an error; they are logged and counted in `skipped`.
pub fn read_records<T: DeserializeOwned, R: Read>(input: R) -> Result<ParsedRecords<T>, LedgerError> {
    let mut reader = delimited_reader(input, FIELD_DELIMITER, RECORD_TERMINATOR);
    collect_tolerant(&mut reader)
}

/// Drain a reader, keeping good records and skipping bad ones
pub(crate) fn collect_tolerant<T: DeserializeOwned, R: Read>(
    reader: &mut csv::Reader<R>,
) -> Result<ParsedRecords<T>, LedgerError> {
    let mut parsed = ParsedRecords {
        records: Vec::new(),
        skipped: 0,
    };

    for result in reader.deserialize::<T>() {
        match result {
            Ok(record) => parsed.records.push(record),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                let err = LedgerError::from(err);
                warn!(error = %err, "skipping malformed dump line");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

/// Read records, failing on the first malformed one
pub(crate) fn collect_strict<T: DeserializeOwned, R: Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<T>, LedgerError> {
    reader
        .deserialize::<T>()
        .map(|result| result.map_err(LedgerError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;
    use rstest::rstest;

    fn payment(id: &str, account_id: i64, amount: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: id.to_string(),
            account_id,
            amount,
            category: "auto".to_string(),
            status,
        }
    }

    #[test]
    fn test_render_payment_line() {
        let line = render_records(&[payment("a", 2, 200, PaymentStatus::InProgress)]).unwrap();
        assert_eq!(line, "a|2|200|auto|INPROGRESS\n");
    }

    #[rstest]
    #[case::accounts(
        render_records(&[Account { id: 1, phone: "123".to_string(), balance: -10 }]).unwrap(),
        "1|123|-10\n"
    )]
    #[case::favorites(
        render_records(&[Favorite {
            id: "f".to_string(),
            account_id: 3,
            name: "car wash".to_string(),
            amount: 50,
            category: "auto".to_string(),
        }]).unwrap(),
        "f|3|car wash|50|auto\n"
    )]
    #[case::failed_payment(
        render_records(&[payment("p", 1, 5, PaymentStatus::Fail)]).unwrap(),
        "p|1|5|auto|FAIL\n"
    )]
    #[case::empty(render_records::<Account>(&[]).unwrap(), "")]
    fn test_render_formats(#[case] rendered: String, #[case] expected: &str) {
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_read_payments() {
        let input = "a|1|100|auto|INPROGRESS\nb|2|200||FAIL\n";

        let parsed: ParsedRecords<Payment> = read_records(input.as_bytes()).unwrap();

        assert_eq!(parsed.skipped, 0);
        assert_eq!(
            parsed.records,
            vec![
                payment("a", 1, 100, PaymentStatus::InProgress),
                Payment {
                    category: String::new(),
                    ..payment("b", 2, 200, PaymentStatus::Fail)
                },
            ]
        );
    }

    #[rstest]
    #[case::bad_number("1|123|ten\n2|321|20\n")]
    #[case::missing_field("1|123\n2|321|20\n")]
    #[case::bad_id("x|123|0\n2|321|20\n")]
    fn test_read_skips_malformed_lines(#[case] input: &str) {
        let parsed: ParsedRecords<Account> = read_records(input.as_bytes()).unwrap();

        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.records, vec![Account { id: 2, phone: "321".to_string(), balance: 20 }]);
    }

    #[test]
    fn test_read_unknown_status_is_skipped() {
        let input = "a|1|100|auto|DONE\n";

        let parsed: ParsedRecords<Payment> = read_records(input.as_bytes()).unwrap();

        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_read_accepts_unterminated_last_line() {
        let parsed: ParsedRecords<Account> = read_records("1|123|0\n2|321|10".as_bytes()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].balance, 10);
    }

    #[test]
    fn test_read_ignores_blank_lines() {
        let parsed: ParsedRecords<Account> = read_records("1|123|0\n\n2|321|10\n".as_bytes()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_collect_strict_fails_on_malformed_line() {
        let mut reader = delimited_reader("1|123|0\n2|321|x\n".as_bytes(), FIELD_DELIMITER, RECORD_TERMINATOR);

        let result: Result<Vec<Account>, _> = collect_strict(&mut reader);

        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }
}
