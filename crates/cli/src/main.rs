use clap::{Args, Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr};
use kessan_lib::{
    apply_rate, ceil_thousand, floor_hundred, floor_thousand, normalize, round_yen, summarize,
    trial_balance_csv, Form, SkippedValue,
};
use rust_decimal::Decimal;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::PathBuf,
    process::exit,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kessan", version, about = "Statutory tax form helpers for journal spreadsheets")]
struct Cli {
    /// Log filter directives, e.g. `kessan_lib=debug`
    #[arg(long, env = "KESSAN_LOG", default_value = "warn", global = true)]
    log: String,

    /// Shorthand for `--log debug`
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add canonical columns to a journal spreadsheet
    Normalize(Io),
    /// Roll forward retained earnings (別表5(1)) from `opening`/`current` rows
    RetainedEarnings(Summary),
    /// Roll forward tax reserves (別表5(2)) from `addition`/`usage` rows
    TaxReserve(Summary),
    /// Debit and credit totals per account of a journal spreadsheet
    TrialBalance(Summary),
    /// `base * rate / 100` rounded half up to whole yen
    Rate {
        #[arg(allow_negative_numbers = true)]
        base: Decimal,
        #[arg(allow_negative_numbers = true)]
        rate: Decimal,
    },
    /// Apply a statutory rounding rule to an amount
    Round {
        #[arg(value_enum)]
        rule: Rule,
        #[arg(allow_negative_numbers = true)]
        value: Decimal,
    },
}

#[derive(Args, Debug)]
struct Io {
    /// Input CSV, stdin when omitted
    input: Option<PathBuf>,
    /// Output CSV, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Summary {
    #[command(flatten)]
    io: Io,
    /// Fail when any amount could not be parsed instead of counting it as zero
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Rule {
    Yen,
    CeilThousand,
    FloorThousand,
    FloorHundred,
}

impl Io {
    fn reader(&self) -> Result<Box<dyn Read>> {
        Ok(match &self.input {
            Some(path) => Box::new(BufReader::new(
                File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        })
    }

    fn writer(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?,
            )),
            None => Box::new(io::stdout().lock()),
        })
    }
}

fn init_logging(cli: &Cli) {
    let directives = if cli.verbose { "debug" } else { cli.log.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(io::stderr)
        .init();
}

/// Logs how many values were skipped and tells whether the run should fail.
///
/// Each skipped value is already logged by the library as it is read.
fn report(skipped: &[SkippedValue], strict: bool) -> bool {
    if !skipped.is_empty() {
        warn!(count = skipped.len(), strict, "values counted as zero");
    }
    strict && !skipped.is_empty()
}

type Pipeline = fn(Box<dyn Read>, Box<dyn Write>) -> Result<Vec<SkippedValue>, kessan_lib::Error>;

fn run_summary(summary: &Summary, f: Pipeline) -> Result<()> {
    let skipped = f(summary.io.reader()?, summary.io.writer()?)?;
    if report(&skipped, summary.strict) {
        eprintln!("{} value(s) could not be parsed", skipped.len());
        exit(2);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Command::Normalize(io) => normalize(io.reader()?, io.writer()?)?,
        Command::RetainedEarnings(s) => {
            run_summary(s, |r, w| summarize(Form::RetainedEarnings, r, w))?
        }
        Command::TaxReserve(s) => run_summary(s, |r, w| summarize(Form::TaxReserve, r, w))?,
        Command::TrialBalance(s) => run_summary(s, trial_balance_csv)?,
        Command::Rate { base, rate } => println!("{}", apply_rate(*base, *rate)),
        Command::Round { rule, value } => {
            let rounded = match rule {
                Rule::Yen => round_yen(*value),
                Rule::CeilThousand => ceil_thousand(*value),
                Rule::FloorThousand => floor_thousand(*value),
                Rule::FloorHundred => floor_hundred(*value),
            };
            println!("{rounded}");
        }
    }

    Ok(())
}
