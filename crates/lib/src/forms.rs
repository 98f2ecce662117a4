//! Rollforwards for the retained earnings (別表5(1)) and tax reserve (別表5(2))
//! schedules.

use crate::ledger::{Aggregate, AmountReader, LedgerRow, Total};
use crate::MonetaryAmount;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::debug;

pub const OPENING: &str = "opening";
pub const CURRENT: &str = "current";
pub const ADDITION: &str = "addition";
pub const USAGE: &str = "usage";

/// Statutory schedules the aggregators produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Form {
    RetainedEarnings,
    TaxReserve,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RetainedEarningsSummary {
    pub opening_balance: MonetaryAmount,
    pub closing_balance: MonetaryAmount,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaxReserveSummary {
    pub addition_total: MonetaryAmount,
    pub usage_total: MonetaryAmount,
    pub ending_balance: MonetaryAmount,
}

/// `closing = Σopening + Σcurrent`. Unparsable values count as zero.
pub fn summarize_retained_earnings<'a>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
) -> RetainedEarningsSummary {
    summarize_retained_earnings_with_report(rows).summary
}

pub fn summarize_retained_earnings_with_report<'a>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
) -> Aggregate<RetainedEarningsSummary> {
    let mut reader = AmountReader::default();
    let mut opening = Total::default();
    let mut current = Total::default();

    for (idx, row) in rows.into_iter().enumerate() {
        opening.add(reader.read(idx, OPENING, row.amount(OPENING)));
        current.add(reader.read(idx, CURRENT, row.amount(CURRENT)));
    }

    let (opening, current) = (opening.value(), current.value());
    let summary = RetainedEarningsSummary {
        opening_balance: opening,
        closing_balance: opening.saturating_add(current),
    };
    debug!(?summary, "retained earnings summarized");

    reader.finish(summary)
}

/// `ending = Σaddition - Σusage`. Unparsable values count as zero.
pub fn summarize_tax_reserve<'a>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
) -> TaxReserveSummary {
    summarize_tax_reserve_with_report(rows).summary
}

pub fn summarize_tax_reserve_with_report<'a>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
) -> Aggregate<TaxReserveSummary> {
    let mut reader = AmountReader::default();
    let mut addition = Total::default();
    let mut usage = Total::default();

    for (idx, row) in rows.into_iter().enumerate() {
        addition.add(reader.read(idx, ADDITION, row.amount(ADDITION)));
        usage.add(reader.read(idx, USAGE, row.amount(USAGE)));
    }

    let (addition, usage) = (addition.value(), usage.value());
    let summary = TaxReserveSummary {
        addition_total: addition,
        usage_total: usage,
        ending_balance: addition.saturating_sub(usage),
    };
    debug!(?summary, "tax reserve summarized");

    reader.finish(summary)
}
