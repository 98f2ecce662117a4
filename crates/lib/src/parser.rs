use crate::{columns::CanonicalField, columns::Table, ledger::LedgerRow};
use csv::ReaderBuilder;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Column `{0}` missing")]
    MissingHeader(CanonicalField),
    #[error(transparent)]
    CSVError(#[from] csv::Error),
}

/// Reads a spreadsheet exported as UTF-8 CSV with a header row.
///
/// Rows may be shorter or longer than the header, see [`Table::new`].
pub fn parse_table<R: std::io::Read>(reader: R) -> Result<Table, ParserError> {
    parse_from_reader(ReaderBuilder::new().flexible(true).from_reader(reader))
}

pub fn parse_from_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Table, ParserError> {
    let headers = reader.headers()?.clone();
    let rows = reader
        .into_records()
        .collect::<Result<Vec<_>, csv::Error>>()?;

    debug!(columns = headers.len(), rows = rows.len(), "table read");
    Ok(Table::new(headers, rows))
}

/// One [`LedgerRow`] per table row, keyed by header.
pub fn parse_ledger_rows(table: &Table) -> Vec<LedgerRow> {
    table
        .rows()
        .iter()
        .map(|record| LedgerRow::from_record(table.headers(), record))
        .collect()
}
