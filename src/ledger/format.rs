use anyhow::{Context, Result};
use std::io::{Read, Write};

use crate::models::{Expense, RecordError, FIELD_SEPARATOR};

/// A ledger line that could not be turned into an [`Expense`].
#[derive(Debug)]
pub(crate) struct SkippedLine {
    pub(crate) line: u64,
    pub(crate) error: RecordError,
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(FIELD_SEPARATOR as u8)
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

/// Parse every line of a day file. Malformed lines are returned separately
/// and never stop the scan; only an I/O failure does.
pub(crate) fn read_records<R: Read>(reader: R) -> Result<(Vec<Expense>, Vec<SkippedLine>)> {
    let mut rdr = reader_builder().from_reader(reader);
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for result in rdr.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e).context("Failed to read ledger file"),
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                skipped.push(SkippedLine {
                    line,
                    error: RecordError::Malformed(e.to_string()),
                });
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        let fields: Result<Vec<&str>, _> = record.iter().map(std::str::from_utf8).collect();
        let parsed = match fields {
            Ok(fields) => Expense::from_fields(&fields),
            Err(e) => Err(RecordError::Malformed(e.to_string())),
        };
        match parsed {
            Ok(expense) => records.push(expense),
            Err(error) => skipped.push(SkippedLine { line, error }),
        }
    }

    Ok((records, skipped))
}

/// Write records as `timestamp|amount|category|description` lines.
pub(crate) fn write_records<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a Expense>,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR as u8)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        wtr.write_record(record.to_fields())
            .context("Failed to write ledger line")?;
    }
    wtr.flush().context("Failed to flush ledger file")?;
    Ok(())
}
