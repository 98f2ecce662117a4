use crate::{RetainedEarningsSummary, Table, TaxReserveSummary, TrialBalance};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use std::io::{Cursor, Write};

/// Label of the grand total row of a trial balance.
pub const TOTAL_LABEL: &str = "合計";

/// Formats an amount into `buf` without allocating and returns the bytes.
// 28 digits, a sign and a decimal point is the widest `Decimal` rendering.
fn format_amount<'a>(buf: &'a mut [u8; 40], amount: &Decimal) -> std::io::Result<&'a [u8]> {
    let mut cursor = Cursor::new(&mut buf[..]);
    write!(cursor, "{}", amount)?;
    let len = cursor.position() as usize;
    Ok(&buf[..len])
}

pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }

    writer.flush()
}

pub fn write_retained_earnings<W: Write>(
    summary: &RetainedEarningsSummary,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&["opening_balance", "closing_balance"])?;

    let mut opening_buf = [0u8; 40];
    let mut closing_buf = [0u8; 40];
    writer.write_record(&[
        format_amount(&mut opening_buf, &summary.opening_balance)?,
        format_amount(&mut closing_buf, &summary.closing_balance)?,
    ])?;

    writer.flush()
}

pub fn write_tax_reserve<W: Write>(
    summary: &TaxReserveSummary,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&["addition_total", "usage_total", "ending_balance"])?;

    let mut addition_buf = [0u8; 40];
    let mut usage_buf = [0u8; 40];
    let mut ending_buf = [0u8; 40];
    writer.write_record(&[
        format_amount(&mut addition_buf, &summary.addition_total)?,
        format_amount(&mut usage_buf, &summary.usage_total)?,
        format_amount(&mut ending_buf, &summary.ending_balance)?,
    ])?;

    writer.flush()
}

pub fn write_trial_balance<W: Write>(
    trial_balance: &TrialBalance,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&["account", "debit_total", "credit_total", "balance"])?;

    let mut debit_buf = [0u8; 40];
    let mut credit_buf = [0u8; 40];
    let mut balance_buf = [0u8; 40];

    let totals = trial_balance
        .accounts
        .iter()
        .map(|(account, t)| (account.as_str(), t.debit_total, t.credit_total))
        .chain(std::iter::once((
            TOTAL_LABEL,
            trial_balance.debit_total(),
            trial_balance.credit_total(),
        )));

    for (account, debit, credit) in totals {
        writer.write_record(&[
            account.as_bytes(),
            format_amount(&mut debit_buf, &debit)?,
            format_amount(&mut credit_buf, &credit)?,
            format_amount(&mut balance_buf, &debit.saturating_sub(credit))?,
        ])?;
    }

    writer.flush()
}
