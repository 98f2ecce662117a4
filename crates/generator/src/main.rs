use csv::WriterBuilder;
use kessan_lib::{CanonicalField, ALIASES};
use rand::prelude::*;
use rand::distributions::WeightedIndex;
use std::io::Write;
use strum::IntoEnumIterator;

const ACCOUNTS: [&str; 10] = [
    "現金",
    "普通預金",
    "売掛金",
    "買掛金",
    "売上高",
    "仕入高",
    "旅費交通費",
    "消耗品費",
    "支払手数料",
    "未払金",
];

const TAX_CODES: [&str; 4] = ["課税売上10%", "課税仕入10%", "課税仕入8%(軽)", "対象外"];

/// First locale header of each canonical field, in field order.
fn locale_headers() -> Vec<&'static str> {
    CanonicalField::iter()
        .filter_map(|field| ALIASES.iter().find(|a| a.canonical == field))
        .map(|a| a.source)
        .collect()
}

fn fiscal_date(rng: &mut impl Rng) -> String {
    // fiscal year April 2024 - March 2025
    let month: u32 = rng.gen_range(1..=12);
    let year = if month >= 4 { 2024 } else { 2025 };
    let day: u32 = rng.gen_range(1..=28);
    format!("{year}/{month:02}/{day:02}")
}

pub fn write_journal<W: Write>(
    rows: u32,
    rng: &mut impl Rng,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(locale_headers())?;

    //mostly well formed amounts with the occasional spreadsheet artefact
    const AMOUNT_WEIGHTS: [usize; 3] = [97, 2, 1];
    let amount_kind = WeightedIndex::new(AMOUNT_WEIGHTS).unwrap();

    let mut txn_buf = itoa::Buffer::new();
    let mut amount_buf = itoa::Buffer::new();

    for txn in 1..=rows {
        let (debit, credit) = loop {
            let pair = (ACCOUNTS.choose(rng), ACCOUNTS.choose(rng));
            if let (Some(d), Some(c)) = pair {
                if d != c {
                    break (*d, *c);
                }
            }
        };
        let amount = rng.gen_range(100u32..2_000_000);
        let amount: &str = match amount_kind.sample(rng) {
            0 => amount_buf.format(amount),
            1 => "",
            _ => "#VALUE!",
        };
        let date = fiscal_date(rng);
        let tax_code = TAX_CODES.choose(rng).copied().unwrap_or("対象外");

        // columns follow CanonicalField order
        writer.write_record([
            txn_buf.format(txn),
            date.as_str(),
            debit,
            credit,
            amount,
            amount,
            tax_code,
        ])?;
    }

    writer.flush()
}

fn main() {
    let rows = std::env::args()
        .nth(1)
        .map(|n| n.parse().expect("row count must be a positive integer"))
        .unwrap_or(100_000);

    write_journal(rows, &mut thread_rng(), std::io::stdout().lock()).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use kessan_lib::{normalize_columns, parse_table, JournalEntry};
    use rand::rngs::StdRng;

    #[test]
    fn headers_cover_every_canonical_field() {
        assert_eq!(
            locale_headers(),
            ["取引No.", "取引日", "借方勘定科目", "貸方勘定科目", "借方金額", "貸方金額", "税区分"]
        );
    }

    #[test]
    fn generated_journal_normalizes_and_reads_back() {
        let mut buf = Vec::new();
        write_journal(500, &mut StdRng::seed_from_u64(7), &mut buf).unwrap();

        let table = normalize_columns(parse_table(buf.as_slice()).unwrap());
        let journal = JournalEntry::from_table(&table).unwrap();
        assert_eq!(journal.summary.len(), 500);
        assert!(journal
            .summary
            .iter()
            .all(|e| e.debit_account != e.credit_account));
        // every row reports its unparsable amount once per side
        assert_eq!(journal.skipped.len() % 2, 0);
    }
}
