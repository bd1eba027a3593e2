use chrono::{DateTime, Utc};
use serde::Serialize;
use temple_admin_api::{ReportFilter, ReportKind};
use temple_admin_db::models::ledger::TransactionModel;

use super::aggregate::{by_category, by_month, summarize, CategoryTotal, MonthlyTotal, Summary};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "lowercase")]
pub enum ReportBody {
    Transactions(Vec<TransactionModel>),
    Summary,
    Category(Vec<CategoryTotal>),
    Monthly(Vec<MonthlyTotal>),
}

/// A derived view over a filtered transaction set.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub filter: ReportFilter,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub body: ReportBody,
}

impl Report {
    /// `transactions` must already be filtered.
    pub fn build(kind: ReportKind, filter: ReportFilter, mut transactions: Vec<TransactionModel>) -> Self {
        transactions.sort_by_key(|tx| (tx.date, tx.created_at));
        let summary = summarize(&transactions);
        let body = match kind {
            ReportKind::Transactions => ReportBody::Transactions(transactions),
            ReportKind::Summary => ReportBody::Summary,
            ReportKind::Category => ReportBody::Category(by_category(&transactions)),
            ReportKind::Monthly => ReportBody::Monthly(by_month(&transactions)),
        };
        Self {
            filter,
            generated_at: Utc::now(),
            summary,
            body,
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self.body {
            ReportBody::Transactions(_) => ReportKind::Transactions,
            ReportBody::Summary => ReportKind::Summary,
            ReportBody::Category(_) => ReportKind::Category,
            ReportBody::Monthly(_) => ReportKind::Monthly,
        }
    }
}
