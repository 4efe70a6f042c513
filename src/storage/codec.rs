//! Line codec for the ledger file: one comma-separated record per transaction.
//!
//! Fields are written with minimal quoting, so ordinary records are byte-identical to the
//! legacy unquoted layout while descriptions containing commas or quotes still round-trip.
//! Reading is strictly line based. A line is only treated as quoted when it is exactly what
//! the writer would produce for its fields; anything else is split on commas as-is, so a stray
//! quote in an old file never spills into the following lines.

use std::io::{BufRead, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::{
    errors::LedgerError,
    ledger::{transaction::FIELD_COUNT, Transaction},
};

use super::{LoadReport, RejectedRecord};

/// Decodes `reader` line by line, appending valid transactions to `into` as they are read.
///
/// Records with the wrong number of fields are dropped and only counted. Records whose
/// values do not parse are skipped and listed in the report. Either way the raw line is kept
/// in [`LoadReport::retained`]. I/O failures abort the read; anything appended before the
/// failure stays in `into`.
pub fn read_transactions<R: BufRead>(
    mut reader: R,
    into: &mut Vec<Transaction>,
) -> Result<LoadReport, LedgerError> {
    let mut report = LoadReport::default();
    let mut buffer = Vec::new();
    let mut line = 0u64;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line += 1;

        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text.trim_end_matches(['\n', '\r']),
            Err(err) => {
                let raw = String::from_utf8_lossy(&buffer);
                tracing::warn!(line, "skipping unreadable ledger record: {err}");
                report.rejected.push(RejectedRecord {
                    line,
                    reason: format!("not valid UTF-8: {err}"),
                });
                report
                    .retained
                    .push(raw.trim_end_matches(['\n', '\r']).to_string());
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }

        let fields = split_line(text);
        if fields.len() != FIELD_COUNT {
            tracing::debug!(line, fields = fields.len(), "dropping malformed ledger record");
            report.dropped += 1;
            report.retained.push(text.to_string());
            continue;
        }

        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        match Transaction::from_fields(&fields) {
            Ok(txn) => {
                into.push(txn);
                report.loaded += 1;
            }
            Err(err) => {
                tracing::warn!(line, "skipping invalid ledger record: {err}");
                report.rejected.push(RejectedRecord {
                    line,
                    reason: err.to_string(),
                });
                report.retained.push(text.to_string());
            }
        }
    }

    Ok(report)
}

/// Encodes every transaction as one `\n`-terminated record, then appends each `retained`
/// line unchanged.
pub fn write_transactions<W: Write>(
    mut writer: W,
    transactions: &[Transaction],
    retained: &[String],
) -> Result<(), LedgerError> {
    {
        let mut records = record_writer(&mut writer);
        for txn in transactions {
            records.write_record(txn.to_fields())?;
        }
        records.flush()?;
    }
    for line in retained {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn record_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Splits one physical line into fields.
fn split_line(text: &str) -> Vec<String> {
    if text.contains('"') {
        if let Some(fields) = quoted_fields(text) {
            return fields;
        }
    }
    text.split(',').map(str::to_string).collect()
}

/// Parses `text` as quoted CSV, accepting it only when re-encoding the fields reproduces the
/// line byte for byte.
fn quoted_fields(text: &str) -> Option<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record).ok()? {
        return None;
    }

    let mut encoded = Vec::with_capacity(text.len() + 1);
    {
        let mut writer = record_writer(&mut encoded);
        writer.write_record(&record).ok()?;
        writer.flush().ok()?;
    }
    let canonical = encoded.strip_suffix(b"\n")? == text.as_bytes();
    canonical.then(|| record.iter().map(str::to_string).collect())
}
