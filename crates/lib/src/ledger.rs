use crate::MonetaryAmount;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a decimal amount")]
pub struct UnparsableAmount(pub String);

/// Parses a spreadsheet cell into an amount.
///
/// Blank cells are zero. Surrounding whitespace is ignored and scientific
/// notation is accepted.
pub fn parse_amount(raw: &str) -> Result<MonetaryAmount, UnparsableAmount> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| UnparsableAmount(raw.to_owned()))
}

/// One journal or schedule line keyed by field name.
///
/// A field may be absent or present without a value; both read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    fields: HashMap<String, Option<String>>,
}

impl LedgerRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `headers` with the cells of `record`. Blank cells become `None`.
    ///
    /// When a header repeats, the leftmost column wins, as in
    /// [`Table::column_index`](crate::Table::column_index).
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let mut row = Self::new();
        for (h, v) in headers.iter().zip(record.iter()) {
            row.fields
                .entry(h.to_owned())
                .or_insert_with(|| (!v.is_empty()).then(|| v.to_owned()));
        }
        row
    }

    pub fn set(&mut self, field: impl Into<String>, value: Option<String>) -> &mut Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    /// Reads `field` as an amount; missing, null and blank are zero.
    pub fn amount(&self, field: &str) -> Result<MonetaryAmount, UnparsableAmount> {
        self.get(field).map_or(Ok(Decimal::ZERO), parse_amount)
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for LedgerRow {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LedgerRow {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k, Some(v.to_owned())))
            .collect()
    }
}

/// A value that failed to parse and was counted as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedValue {
    /// Zero based position of the row in the input sequence.
    pub row: usize,
    pub field: String,
    pub raw: String,
}

/// A summary together with the values that were skipped while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate<T> {
    pub summary: T,
    pub skipped: Vec<SkippedValue>,
}

impl<T> Aggregate<T> {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Fail open amount reader that remembers what it could not parse.
#[derive(Debug, Default)]
pub(crate) struct AmountReader {
    skipped: Vec<SkippedValue>,
}

impl AmountReader {
    pub(crate) fn read(
        &mut self,
        row: usize,
        field: &str,
        value: Result<MonetaryAmount, UnparsableAmount>,
    ) -> MonetaryAmount {
        match value {
            Ok(amount) => amount,
            Err(UnparsableAmount(raw)) => {
                warn!(row, field, raw = %raw, "unparsable amount counted as zero");
                self.skipped.push(SkippedValue {
                    row,
                    field: field.to_owned(),
                    raw,
                });
                Decimal::ZERO
            }
        }
    }

    pub(crate) fn finish<T>(self, summary: T) -> Aggregate<T> {
        Aggregate {
            summary,
            skipped: self.skipped,
        }
    }
}

/// Running sum that gives the same result for any order of its terms.
///
/// Positive and negative terms saturate in separate buckets, so a sum that
/// leaves the decimal range clamps the same way whatever the row order.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Total {
    positive: MonetaryAmount,
    negative: MonetaryAmount,
}

impl Total {
    pub(crate) fn add(&mut self, amount: MonetaryAmount) {
        if amount.is_sign_negative() {
            self.negative = self.negative.saturating_add(amount);
        } else {
            self.positive = self.positive.saturating_add(amount);
        }
    }

    pub(crate) fn value(&self) -> MonetaryAmount {
        self.positive.saturating_add(self.negative)
    }
}

impl FromIterator<MonetaryAmount> for Total {
    fn from_iter<I: IntoIterator<Item = MonetaryAmount>>(iter: I) -> Self {
        let mut total = Self::default();
        for amount in iter {
            total.add(amount);
        }
        total
    }
}
