//! CSV export and import over the `csv` crate.

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use std::str::FromStr;
use temple_admin_api::domain::validation::{parse_iso_date, validate_positive};
use temple_admin_api::{ApiError, ApiResult, TransactionType};
use temple_admin_db::models::ledger::TransactionModel;

use super::labels::Labels;
use super::model::Report;
use super::table::Table;

const BOM: &str = "\u{feff}";

/// UTF-8 with a byte order mark so spreadsheet tools pick up Devanagari.
/// Fields holding a comma, quote or line break are quoted.
pub fn render(report: &Report, labels: &Labels) -> ApiResult<String> {
    let table = Table::from_report(report, labels);
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(BOM.as_bytes().to_vec());
    writer.write_record(&table.headers).map_err(internal)?;
    for row in &table.rows {
        writer.write_record(row).map_err(internal)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::InternalError(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ApiError::InternalError(e.to_string()))
}

fn internal(e: csv::Error) -> ApiError {
    ApiError::InternalError(format!("CSV write failed: {e}"))
}

/// Splits CSV text into records. Rows may differ in length; blank rows are
/// dropped.
pub fn parse(text: &str) -> ApiResult<Vec<Vec<String>>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ApiError::field("file", format!("unreadable CSV: {e}")))?;
        if record.iter().any(|f| !f.trim().is_empty()) {
            records.push(record.iter().map(str::to_string).collect());
        }
    }
    Ok(records)
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportColumns {
    pub date: usize,
    pub transaction_type: usize,
    pub category: usize,
    pub description: usize,
    pub amount: usize,
    pub sub_category: Option<usize>,
    pub party: Option<usize>,
    pub payment_mode: Option<usize>,
}

/// Exact (case-insensitive) header match first, then substring.
fn find_column(headers: &[String], name: &str, exclude: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    normalized
        .iter()
        .position(|h| h == name)
        .or_else(|| {
            normalized
                .iter()
                .position(|h| h.contains(name) && !exclude.iter().any(|x| h.contains(x)))
        })
}

impl ImportColumns {
    pub fn resolve(headers: &[String]) -> ApiResult<Self> {
        let required = |name: &str, exclude: &[&str]| {
            find_column(headers, name, exclude)
                .ok_or_else(|| ApiError::field("file", format!("missing column: {name}")))
        };
        Ok(Self {
            date: required("date", &[])?,
            transaction_type: required("type", &[])?,
            category: required("category", &["sub"])?,
            description: required("description", &[])?,
            amount: required("amount", &[])?,
            sub_category: find_column(headers, "sub", &[]),
            party: find_column(headers, "name", &[])
                .or_else(|| find_column(headers, "donor", &[]))
                .or_else(|| find_column(headers, "payee", &[])),
            payment_mode: find_column(headers, "mode", &[]),
        })
    }
}

/// Outcome of parsing an import file.
#[derive(Debug, Clone)]
pub struct ParsedImport {
    pub rows: Vec<TransactionModel>,
    pub skipped: usize,
}

/// Builds transactions from CSV text. Rows with a bad date, unknown type or
/// an amount that is unparsable or finer than paise are counted as skipped.
pub fn parse_transactions(text: &str) -> ApiResult<ParsedImport> {
    let mut records = parse(text)?.into_iter();
    let headers = records
        .next()
        .ok_or_else(|| ApiError::field("file", "file is empty"))?;
    let columns = ImportColumns::resolve(&headers)?;

    let mut rows = Vec::new();
    let mut skipped = 0;
    for record in records {
        match to_transaction(&record, &columns) {
            Some(tx) => rows.push(tx),
            None => skipped += 1,
        }
    }
    Ok(ParsedImport { rows, skipped })
}

fn to_transaction(record: &[String], columns: &ImportColumns) -> Option<TransactionModel> {
    let cell = |i: usize| record.get(i).map(|v| v.trim()).unwrap_or_default();
    let optional = |i: Option<usize>| {
        i.map(cell)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let date = parse_iso_date(cell(columns.date))?;
    let transaction_type = cell(columns.transaction_type).parse::<TransactionType>().ok()?;
    let amount = Decimal::from_str(&cell(columns.amount).replace(',', ""))
        .ok()
        .filter(|a| validate_positive(a).is_ok())?;

    let mut tx = TransactionModel::new(
        date,
        transaction_type,
        cell(columns.category),
        cell(columns.description),
        amount,
    );
    tx.sub_category = optional(columns.sub_category);
    tx.payment_mode = optional(columns.payment_mode);
    let party = optional(columns.party);
    if transaction_type.is_income() {
        tx.donor_name = party;
    } else {
        tx.payee_name = party;
    }
    Some(tx)
}
