use chrono::NaiveDate;
use csv::StringRecord;
use ledgerize_core::{parse_fixed_date, Direction, Transaction};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Bank export layouts the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementFormat {
    #[default]
    Swedbank,
}

impl FromStr for StatementFormat {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swedbank" => Ok(StatementFormat::Swedbank),
            other => Err(CsvError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementFormat::Swedbank => write!(f, "swedbank"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Unsupported statement format: '{0}'")]
    UnsupportedFormat(String),
    #[error("Row {row}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },
}

impl CsvError {
    /// True for failures of reading the file itself, as opposed to its contents.
    pub fn is_read_error(&self) -> bool {
        matches!(self, CsvError::IoError(_) | CsvError::CsvError(_))
    }
}

/// Swedbank statement columns.
mod swedbank {
    pub const HEADER_ROWS: usize = 2;
    pub const MIN_FIELDS: usize = 8;

    pub const DATE: usize = 2;
    pub const BENEFICIARY: usize = 3;
    pub const DETAILS: usize = 4;
    pub const AMOUNT: usize = 5;
    pub const CURRENCY: usize = 6;
    pub const DIRECTION: usize = 7;

    /// Marker in the direction column for incoming money.
    pub const CREDIT_MARKER: &str = "K";
    pub const DATE_FORMAT: &str = "%d.%m.%Y";

    /// Summary rows that are not transactions.
    pub const META_DESCRIPTIONS: &[&str] = &["Turnover", "closing balance", "Accrued interest"];
}

/// Reads every row of a semicolon-delimited export. No header handling is done
/// here; the format parser decides which rows to skip.
///
/// Exports are not always UTF-8; bytes that do not decode are replaced with
/// U+FFFD rather than failing the read.
pub fn read_rows<R: Read>(data: R) -> Result<Vec<StringRecord>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        let fields: Vec<String> = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        rows.push(StringRecord::from(fields));
    }
    Ok(rows)
}

/// Converts raw rows into transactions. Any bad row fails the whole parse.
pub fn parse_statement(
    rows: &[StringRecord],
    format: StatementFormat,
) -> Result<Vec<Transaction>, CsvError> {
    match format {
        StatementFormat::Swedbank => parse_swedbank(rows),
    }
}

pub fn import_statement(
    path: &Path,
    format: StatementFormat,
) -> Result<Vec<Transaction>, CsvError> {
    let file = File::open(path)?;
    let rows = read_rows(file)?;
    parse_statement(&rows, format)
}

fn parse_swedbank(rows: &[StringRecord]) -> Result<Vec<Transaction>, CsvError> {
    let mut transactions = Vec::new();

    for (idx, record) in rows.iter().enumerate().skip(swedbank::HEADER_ROWS) {
        let row = idx + 1;
        tracing::debug!(
            row,
            date = record.get(swedbank::DATE),
            beneficiary = record.get(swedbank::BENEFICIARY),
            details = record.get(swedbank::DETAILS),
            amount = record.get(swedbank::AMOUNT),
            currency = record.get(swedbank::CURRENCY),
            direction = record.get(swedbank::DIRECTION),
            "statement row"
        );

        let tx = swedbank_transaction(row, record)?;

        if swedbank::META_DESCRIPTIONS.contains(&tx.description.as_str()) {
            tracing::debug!(row, description = %tx.description, "skipping summary row");
            continue;
        }
        transactions.push(tx);
    }

    Ok(transactions)
}

/// Builds a complete transaction from one row or reports why it cannot.
fn swedbank_transaction(row: usize, record: &StringRecord) -> Result<Transaction, CsvError> {
    if record.len() < swedbank::MIN_FIELDS {
        return Err(CsvError::MalformedRow {
            row,
            expected: swedbank::MIN_FIELDS,
            found: record.len(),
        });
    }
    // Bounds checked above.
    let field = |i: usize| record.get(i).unwrap_or_default();

    let direction = if field(swedbank::DIRECTION) == swedbank::CREDIT_MARKER {
        Direction::Credit
    } else {
        Direction::Debit
    };

    Ok(Transaction {
        direction,
        date: parse_date(row, field(swedbank::DATE))?,
        amount: parse_amount(row, field(swedbank::AMOUNT))?,
        beneficiary: field(swedbank::BENEFICIARY).to_string(),
        description: field(swedbank::DETAILS).to_string(),
        currency: field(swedbank::CURRENCY).to_string(),
    })
}

/// Dates must be exactly `DD.MM.YYYY`.
fn parse_date(row: usize, s: &str) -> Result<NaiveDate, CsvError> {
    parse_fixed_date(s, swedbank::DATE_FORMAT).ok_or_else(|| {
        tracing::error!(row, date = s, layout = swedbank::DATE_FORMAT, "failed to parse date");
        CsvError::InvalidDate {
            row,
            value: s.to_string(),
        }
    })
}

/// Decimal comma amounts: only the first comma becomes the decimal point.
fn parse_amount(row: usize, s: &str) -> Result<f64, CsvError> {
    let corrected = s.replacen(',', ".", 1);
    corrected
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| {
            tracing::error!(row, amount = s, "failed to parse amount");
            CsvError::InvalidAmount {
                row,
                value: s.to_string(),
            }
        })
}
