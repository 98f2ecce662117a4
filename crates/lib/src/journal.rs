use crate::{
    columns::{CanonicalField, Table},
    ledger::{parse_amount, Aggregate, AmountReader, Total},
    parser::ParserError,
    MonetaryAmount,
};
use std::collections::BTreeMap;
use tracing::debug;

/// A journal line read from a normalized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub txn_id: String,
    pub date: Option<String>,
    pub debit_account: String,
    pub credit_account: String,
    pub debit_amount: MonetaryAmount,
    pub credit_amount: MonetaryAmount,
    pub tax_code: Option<String>,
}

#[derive(Clone, Copy)]
struct FieldToIndexMap {
    txn_id: usize,
    date: Option<usize>,
    debit_account: usize,
    credit_account: usize,
    debit_amount: usize,
    credit_amount: usize,
    tax_code: Option<usize>,
}

impl FieldToIndexMap {
    fn new(table: &Table) -> Result<Self, ParserError> {
        let required = |field: CanonicalField| {
            table
                .column_index(field.as_ref())
                .ok_or(ParserError::MissingHeader(field))
        };
        let optional = |field: CanonicalField| table.column_index(field.as_ref());

        Ok(Self {
            txn_id: required(CanonicalField::TxnId)?,
            date: optional(CanonicalField::Date),
            debit_account: required(CanonicalField::DebitAccount)?,
            credit_account: required(CanonicalField::CreditAccount)?,
            debit_amount: required(CanonicalField::DebitAmount)?,
            credit_amount: required(CanonicalField::CreditAmount)?,
            tax_code: optional(CanonicalField::TaxCode),
        })
    }
}

impl JournalEntry {
    /// Reads every row of a table that went through the column normalizer.
    ///
    /// Amounts follow the same fail open rule as the schedule aggregators.
    pub fn from_table(table: &Table) -> Result<Aggregate<Vec<JournalEntry>>, ParserError> {
        let map = FieldToIndexMap::new(table)?;
        let mut reader = AmountReader::default();

        let entries = table
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let cell = |i: usize| row.get(i).unwrap_or("");
                let non_blank = |i: Option<usize>| {
                    i.map(cell)
                        .filter(|v| !v.trim().is_empty())
                        .map(str::to_owned)
                };

                JournalEntry {
                    txn_id: cell(map.txn_id).to_owned(),
                    date: non_blank(map.date),
                    debit_account: cell(map.debit_account).trim().to_owned(),
                    credit_account: cell(map.credit_account).trim().to_owned(),
                    debit_amount: reader.read(
                        idx,
                        CanonicalField::DebitAmount.as_ref(),
                        parse_amount(cell(map.debit_amount)),
                    ),
                    credit_amount: reader.read(
                        idx,
                        CanonicalField::CreditAmount.as_ref(),
                        parse_amount(cell(map.credit_amount)),
                    ),
                    tax_code: non_blank(map.tax_code),
                }
            })
            .collect::<Vec<_>>();

        debug!(entries = entries.len(), "journal read");
        Ok(reader.finish(entries))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccountTotals {
    pub debit_total: MonetaryAmount,
    pub credit_total: MonetaryAmount,
}

impl AccountTotals {
    /// Debit minus credit.
    pub fn balance(&self) -> MonetaryAmount {
        self.debit_total.saturating_sub(self.credit_total)
    }
}

/// Debit and credit totals per account, ordered by account name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrialBalance {
    pub accounts: BTreeMap<String, AccountTotals>,
}

impl TrialBalance {
    pub fn debit_total(&self) -> MonetaryAmount {
        self.accounts
            .values()
            .map(|t| t.debit_total)
            .collect::<Total>()
            .value()
    }

    pub fn credit_total(&self) -> MonetaryAmount {
        self.accounts
            .values()
            .map(|t| t.credit_total)
            .collect::<Total>()
            .value()
    }

    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }
}

/// Sums each entry's debit amount onto its debit account and its credit
/// amount onto its credit account. Sides with a blank account are ignored.
pub fn trial_balance<'a>(entries: impl IntoIterator<Item = &'a JournalEntry>) -> TrialBalance {
    let mut sums: BTreeMap<String, (Total, Total)> = BTreeMap::new();

    for entry in entries {
        if !entry.debit_account.is_empty() {
            let (debit, _) = sums.entry(entry.debit_account.clone()).or_default();
            debit.add(entry.debit_amount);
        }
        if !entry.credit_account.is_empty() {
            let (_, credit) = sums.entry(entry.credit_account.clone()).or_default();
            credit.add(entry.credit_amount);
        }
    }

    let balance = TrialBalance {
        accounts: sums
            .into_iter()
            .map(|(account, (debit, credit))| {
                let totals = AccountTotals {
                    debit_total: debit.value(),
                    credit_total: credit.value(),
                };
                (account, totals)
            })
            .collect(),
    };
    debug!(accounts = balance.accounts.len(), "trial balance built");
    balance
}
