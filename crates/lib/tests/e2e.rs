use csv_diff::{csv::Csv, csv_diff::CsvByteDiffLocal};
use eyre::Context;
use glob::glob;
use kessan_lib::{normalize, summarize, trial_balance_csv, Form, SkippedValue};
use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Write},
    path::Path,
};

/// Picks the pipeline from the test case file name prefix.
fn run_case<R: Read, W: Write>(
    input: &Path,
    reader: R,
    writer: W,
) -> eyre::Result<Vec<SkippedValue>> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre::eyre!("unreadable test case name {input:?}"))?;

    Ok(if name.starts_with("normalize-") {
        normalize(reader, writer).map(|_| Vec::new())?
    } else if name.starts_with("retained-earnings-") {
        summarize(Form::RetainedEarnings, reader, writer)?
    } else if name.starts_with("tax-reserve-") {
        summarize(Form::TaxReserve, reader, writer)?
    } else if name.starts_with("trial-balance-") {
        trial_balance_csv(reader, writer)?
    } else {
        eyre::bail!("no pipeline for test case {name}")
    })
}

#[test]
fn run_test_files() {
    let mut inputs = glob("tests/test-cases/*.input.csv")
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut outputs = glob("tests/test-cases/*.output.csv")
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    inputs.sort();
    outputs.sort();
    assert!(!inputs.is_empty());
    assert_eq!(inputs.len(), outputs.len());

    let csv_byte_diff = CsvByteDiffLocal::new().unwrap();

    for (input, output) in inputs.iter().zip(outputs.iter()) {
        let file_name = input.file_name().unwrap();
        let expected = std::fs::read(output).unwrap();
        let mut actual = Vec::new();
        let mut reader = BufReader::new(File::open(input).unwrap());

        run_case(input, &mut reader, &mut actual).unwrap();

        let mut diff = csv_byte_diff
            .diff(
                Csv::with_reader_seek(Cursor::new(&actual)),
                Csv::with_reader_seek(Cursor::new(&expected)),
            )
            .with_context(|| {
                format!(
                    "Failed to diff csv ({file_name:?}), actual.len() = {} and expected.len() = {}",
                    actual.len(),
                    expected.len()
                )
            })
            .unwrap();

        diff.sort_by_line();

        assert!(
            diff.as_slice().is_empty(),
            "The input file {input:?} didn't match the output file {output:?}\n{diff:#?}"
        );
    }
}

#[test]
fn summaries_report_skipped_values() {
    let input = "item,opening,current\nA,100,50\nB,,bad\n";
    let mut out = Vec::new();
    let skipped = summarize(Form::RetainedEarnings, input.as_bytes(), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "opening_balance,closing_balance\n100,150\n"
    );
    assert_eq!(
        skipped,
        [SkippedValue {
            row: 1,
            field: "current".to_owned(),
            raw: "bad".to_owned(),
        }]
    );
}

#[test]
fn normalizing_twice_changes_nothing() {
    let input = std::fs::read("tests/test-cases/normalize-journal.input.csv").unwrap();
    let mut once = Vec::new();
    normalize(input.as_slice(), &mut once).unwrap();
    let mut twice = Vec::new();
    normalize(once.as_slice(), &mut twice).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn trial_balance_needs_a_journal() {
    let input = "item,opening,current\nA,100,50\n";
    let result = trial_balance_csv(input.as_bytes(), Vec::new());
    assert!(matches!(result, Err(kessan_lib::Error::ParserError(_))));
}
