//! CSV import of transactions
//!
//! Expected header: `date,type,amount,category,name` (any column order,
//! case-insensitive, `name` optional).

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionType};

struct Columns {
    date: usize,
    transaction_type: usize,
    amount: usize,
    category: usize,
    name: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };
        let required = |wanted: &str| {
            find(wanted).ok_or_else(|| Error::Import(format!("Missing '{}' column", wanted)))
        };

        Ok(Self {
            date: required("date")?,
            transaction_type: required("type")?,
            amount: required("amount")?,
            category: required("category")?,
            name: find("name"),
        })
    }
}

/// Parse and validate every row; the first bad row fails the whole import
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let tx = parse_record(&record, &columns)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        transactions.push(tx);
    }

    debug!("Parsed {} transactions from CSV", transactions.len());
    Ok(transactions)
}

fn parse_record(record: &StringRecord, columns: &Columns) -> Result<NewTransaction> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Import(format!("Missing {}", name)))
    };

    let date = parse_date(field(columns.date, "date")?)?;
    let transaction_type = field(columns.transaction_type, "type")?
        .parse::<TransactionType>()
        .map_err(Error::Import)?;
    let amount = parse_amount(field(columns.amount, "amount")?)?;
    let category = field(columns.category, "category")?.to_string();
    let name = columns
        .name
        .and_then(|idx| record.get(idx))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let tx = NewTransaction {
        name,
        transaction_type,
        amount,
        category,
        date,
    };
    tx.validate()?;
    Ok(tx)
}

/// Accepts `YYYY-MM-DD` and `MM/DD/YYYY`
fn parse_date(s: &str) -> Result<NaiveDate> {
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount, ignoring currency symbols and thousands separators
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned = s.replace(['$', ',', ' '], "");
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
