//! Mapping of locale specific spreadsheet headers onto canonical field names.

use csv::StringRecord;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

/// Locale independent names of the journal columns the core works with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum CanonicalField {
    TxnId,
    Date,
    DebitAccount,
    CreditAccount,
    DebitAmount,
    CreditAmount,
    TaxCode,
}

/// One `source header -> canonical field` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAlias<'a> {
    pub source: &'a str,
    pub canonical: CanonicalField,
}

const fn alias(source: &'static str, canonical: CanonicalField) -> ColumnAlias<'static> {
    ColumnAlias { source, canonical }
}

/// Default alias table for journal exports.
///
/// Order matters: when several headers map to the same canonical field the
/// earliest header present in the spreadsheet provides the column.
pub const ALIASES: &[ColumnAlias<'static>] = &[
    alias("取引No.", CanonicalField::TxnId),
    alias("伝票番号", CanonicalField::TxnId),
    alias("取引日", CanonicalField::Date),
    alias("日付", CanonicalField::Date),
    alias("借方勘定科目", CanonicalField::DebitAccount),
    alias("貸方勘定科目", CanonicalField::CreditAccount),
    alias("借方金額", CanonicalField::DebitAmount),
    alias("貸方金額", CanonicalField::CreditAmount),
    alias("税区分", CanonicalField::TaxCode),
    alias("借方税区分", CanonicalField::TaxCode),
];

/// A spreadsheet: a header record and rows of the same width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Builds a table, padding short rows with empty cells and dropping cells
    /// beyond the last header.
    pub fn new(headers: StringRecord, rows: impl IntoIterator<Item = StringRecord>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() > width {
                    debug!(len = row.len(), width, "dropping cells without a header");
                    row.truncate(width);
                }
                while row.len() < width {
                    row.push_field("");
                }
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Position of the first header equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of the named column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or("")))
    }

    fn push_copy_of(&mut self, source: usize, name: &str) {
        self.headers.push_field(name);
        for row in &mut self.rows {
            let value = row.get(source).unwrap_or("").to_owned();
            row.push_field(&value);
        }
    }
}

/// Adds canonical columns using [`ALIASES`].
pub fn normalize_columns(table: Table) -> Table {
    normalize_columns_with(table, ALIASES)
}

/// Adds a canonical column for every alias whose source header is present and
/// whose canonical field is not. Existing columns are never modified.
pub fn normalize_columns_with(mut table: Table, aliases: &[ColumnAlias<'_>]) -> Table {
    for alias in aliases {
        let canonical = alias.canonical.as_ref();
        if table.has_column(canonical) {
            continue;
        }
        let Some(source) = table.column_index(alias.source) else {
            continue;
        };

        debug!(source = alias.source, canonical, "adding canonical column");
        table.push_copy_of(source, canonical);
    }

    table
}
