mod columns;
mod error;
mod forms;
mod journal;
mod ledger;
mod parser;
mod rounding;
mod writer;

/// Exact decimal yen amount.
// Statutory amounts are rounded at yen, hundred and thousand yen boundaries,
// so a binary float or binary fixed point type would misplace half-way values
// such as 2.5. `Decimal` keeps 96 bits of mantissa with a base 10 scale.
pub type MonetaryAmount = rust_decimal::Decimal;

pub use columns::*;
pub use error::Error;
pub use forms::*;
pub use journal::*;
pub use ledger::*;
pub use parser::{parse_from_reader, parse_ledger_rows, parse_table, ParserError};
pub use rounding::*;
pub use writer::{write_retained_earnings, write_table, write_tax_reserve, write_trial_balance};

/// Reads a journal spreadsheet and writes it back with canonical columns added.
pub fn normalize<R: std::io::Read, W: std::io::Write>(
    reader: R,
    writer: W,
) -> Result<(), Error> {
    let table = normalize_columns(parse_table(reader)?);
    Ok(write_table(&table, writer)?)
}

/// Reads schedule rows and writes the summary of the requested form.
///
/// Values that could not be parsed were counted as zero and are returned so
/// the caller can decide whether to surface them.
pub fn summarize<R: std::io::Read, W: std::io::Write>(
    form: Form,
    reader: R,
    writer: W,
) -> Result<Vec<SkippedValue>, Error> {
    let rows = parse_ledger_rows(&parse_table(reader)?);
    let skipped = match form {
        Form::RetainedEarnings => {
            let aggregate = summarize_retained_earnings_with_report(&rows);
            write_retained_earnings(&aggregate.summary, writer)?;
            aggregate.skipped
        }
        Form::TaxReserve => {
            let aggregate = summarize_tax_reserve_with_report(&rows);
            write_tax_reserve(&aggregate.summary, writer)?;
            aggregate.skipped
        }
    };

    Ok(skipped)
}

/// Reads a journal spreadsheet, normalizes it and writes per account totals.
pub fn trial_balance_csv<R: std::io::Read, W: std::io::Write>(
    reader: R,
    writer: W,
) -> Result<Vec<SkippedValue>, Error> {
    let table = normalize_columns(parse_table(reader)?);
    let journal = JournalEntry::from_table(&table)?;
    write_trial_balance(&trial_balance(&journal.summary), writer)?;

    Ok(journal.skipped)
}
