use rust_decimal::Decimal;

use super::filter::describe;
use super::labels::Labels;
use super::model::{Report, ReportBody};

/// A report flattened into header and text rows, shared by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Indices of right-aligned numeric columns
    pub numeric: Vec<usize>,
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

impl Table {
    pub fn from_report(report: &Report, labels: &Labels) -> Self {
        let s = |v: &str| v.to_string();
        match &report.body {
            ReportBody::Transactions(rows) => Table {
                headers: vec![
                    s(labels.date),
                    s(labels.receipt),
                    s(labels.kind),
                    s(labels.category),
                    s(labels.sub_category),
                    s(labels.description),
                    s(labels.party),
                    s(labels.amount),
                ],
                rows: rows
                    .iter()
                    .map(|tx| {
                        vec![
                            tx.date.to_string(),
                            tx.receipt_str().unwrap_or_default().to_string(),
                            s(labels.transaction_type(tx.transaction_type)),
                            tx.category.clone(),
                            tx.sub_category.clone().unwrap_or_default(),
                            tx.description.clone(),
                            tx.party_name().unwrap_or_default().to_string(),
                            format_amount(tx.amount),
                        ]
                    })
                    .collect(),
                numeric: vec![7],
            },
            ReportBody::Summary => Table {
                headers: vec![s(labels.metric), s(labels.amount)],
                rows: vec![
                    vec![s(labels.total_income), format_amount(report.summary.total_income)],
                    vec![s(labels.total_expense), format_amount(report.summary.total_expense)],
                    vec![s(labels.net), format_amount(report.summary.net)],
                    vec![s(labels.count), report.summary.count.to_string()],
                ],
                numeric: vec![1],
            },
            ReportBody::Category(rows) => Table {
                headers: vec![s(labels.category), s(labels.count), s(labels.amount)],
                rows: rows
                    .iter()
                    .map(|c| vec![c.category.clone(), c.count.to_string(), format_amount(c.amount)])
                    .collect(),
                numeric: vec![1, 2],
            },
            ReportBody::Monthly(rows) => Table {
                headers: vec![
                    s(labels.month),
                    s(labels.income),
                    s(labels.expense),
                    s(labels.net),
                    s(labels.count),
                ],
                rows: rows
                    .iter()
                    .map(|m| {
                        vec![
                            m.month.clone(),
                            format_amount(m.income),
                            format_amount(m.expense),
                            format_amount(m.net),
                            m.count.to_string(),
                        ]
                    })
                    .collect(),
                numeric: vec![1, 2, 3, 4],
            },
        }
    }
}

/// "Category: Annadan, Month: 2026-02", or the all-records label.
pub fn filter_line(report: &Report, labels: &Labels) -> String {
    let parts = describe(&report.filter);
    if parts.is_empty() {
        return labels.all_records.to_string();
    }
    parts
        .into_iter()
        .map(|(key, value)| format!("{}: {}", labels.criterion(key), value))
        .collect::<Vec<_>>()
        .join(", ")
}
