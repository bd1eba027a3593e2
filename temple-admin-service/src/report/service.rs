use serde::Serialize;
use sqlx::Database;
use temple_admin_api::{ApiResult, ReportFormat, ReportQuery};
use temple_admin_db::repository::{CreateBatch, LoadAll};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::dashboard::Dashboard;
use super::filter::apply_filter;
use super::labels::Labels;
use super::model::Report;
use super::{csv_format, html, pdf};
use crate::repositories::Repositories;

/// A rendered export ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub content_type: &'static str,
    pub filename: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum ReportOutput {
    Json(Report),
    File(RenderedReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ReportService<DB: Database> {
    repos: Repositories<DB>,
}

impl<DB: Database> ReportService<DB> {
    pub fn new(repos: Repositories<DB>) -> Self {
        Self { repos }
    }

    pub async fn build(&self, query: &ReportQuery) -> ApiResult<Report> {
        query.validate()?;
        let filter = query.filter();
        let all = self.repos.transactions.load_all().await?;
        let rows = apply_filter(&all, &filter)?;
        debug!(kind = ?query.kind, rows = rows.len(), "building report");
        Ok(Report::build(query.kind, filter, rows))
    }

    /// Builds the report and renders it in the requested format.
    pub async fn export(&self, query: &ReportQuery) -> ApiResult<ReportOutput> {
        let report = self.build(query).await?;
        let labels = Labels::for_language(query.lang);
        let stem = format!(
            "report-{}-{}",
            kind_slug(&report),
            report.generated_at.format("%Y-%m-%d")
        );

        let rendered = match query.format {
            ReportFormat::Json => return Ok(ReportOutput::Json(report)),
            ReportFormat::Csv => RenderedReport {
                content_type: "text/csv; charset=utf-8",
                filename: format!("{stem}.csv"),
                body: csv_format::render(&report, labels)?.into_bytes(),
            },
            ReportFormat::Html => RenderedReport {
                content_type: "text/html; charset=utf-8",
                filename: format!("{stem}.html"),
                body: html::render(&report, labels).into_bytes(),
            },
            ReportFormat::Pdf => RenderedReport {
                content_type: "application/pdf",
                filename: format!("{stem}.pdf"),
                body: pdf::render(&report)?,
            },
        };
        info!(file = %rendered.filename, bytes = rendered.body.len(), "report exported");
        Ok(ReportOutput::File(rendered))
    }

    /// Imports CSV rows as transactions without receipt numbers.
    pub async fn import_csv(&self, text: &str, actor: Option<Uuid>) -> ApiResult<ImportSummary> {
        let parsed = csv_format::parse_transactions(text)?;
        let mut rows = parsed.rows;
        for row in &mut rows {
            row.created_by = actor;
        }

        let imported = if rows.is_empty() {
            0
        } else {
            let audit_log_id = self.repos.audit(actor, "transaction.import").await?;
            self.repos
                .transactions
                .create_batch(rows, Some(audit_log_id))
                .await?
                .len()
        };
        info!(imported, skipped = parsed.skipped, "CSV import finished");
        Ok(ImportSummary {
            imported,
            skipped: parsed.skipped,
        })
    }

    pub async fn dashboard(&self) -> ApiResult<Dashboard> {
        Ok(Dashboard::compute(
            &self.repos.shops.load_all().await?,
            &self.repos.tenants.load_all().await?,
            &self.repos.agreements.load_all().await?,
            &self.repos.loans.load_all().await?,
            &self.repos.penalties.load_all().await?,
            &self.repos.transactions.load_all().await?,
        ))
    }
}

fn kind_slug(report: &Report) -> &'static str {
    match report.kind() {
        temple_admin_api::ReportKind::Transactions => "transactions",
        temple_admin_api::ReportKind::Summary => "summary",
        temple_admin_api::ReportKind::Category => "category",
        temple_admin_api::ReportKind::Monthly => "monthly",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{DuplicateGuard, LedgerService};
    use crate::rent::RentService;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sqlx::Postgres;
    use std::time::Duration;
    use temple_admin_api::{
        CreateExpenseRequest, CreateShopRequest, ReportKind, ReportLanguage, TransactionType,
    };

    fn services() -> (ReportService<Postgres>, LedgerService<Postgres>, RentService<Postgres>) {
        let repos = Repositories::in_memory();
        (
            ReportService::new(repos.clone()),
            LedgerService::new(repos.clone(), DuplicateGuard::new(Duration::ZERO)),
            RentService::new(repos),
        )
    }

    const IMPORT: &str = "date,type,category,description,amount\n\
                          2026-02-01,Donation,Annadan,Prasad,1000\n\
                          2026-02-03,Expense,Pooja,Flowers,250\n\
                          2026-03-01,RentIncome,Rent,Shop A-010,6000\n\
                          2026-03-02,Gift,Other,unknown type,5\n";

    #[tokio::test]
    async fn test_import_then_report() {
        let (reports, _, _) = services();
        let summary = reports.import_csv(IMPORT, None).await.unwrap();
        assert_eq!(summary, ImportSummary { imported: 3, skipped: 1 });

        let query = ReportQuery {
            kind: ReportKind::Summary,
            month: Some("2026-02".to_string()),
            ..Default::default()
        };
        let report = reports.build(&query).await.unwrap();
        assert_eq!(report.summary.total_income, Decimal::new(1000, 0));
        assert_eq!(report.summary.total_expense, Decimal::new(250, 0));
        assert_eq!(report.summary.count, 2);
    }

    #[tokio::test]
    async fn test_deleted_transactions_are_excluded() {
        let (reports, ledger, _) = services();
        let expense = ledger
            .create_expense(
                CreateExpenseRequest {
                    date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
                    transaction_type: TransactionType::Expense,
                    category: "Pooja".to_string(),
                    sub_category: None,
                    description: "Oil".to_string(),
                    amount: Decimal::new(300, 0),
                    payee_name: "Shop".to_string(),
                    payee_contact: None,
                    payment_mode: None,
                },
                None,
            )
            .await
            .unwrap();
        reports.import_csv(IMPORT, None).await.unwrap();
        ledger
            .delete(crate::ledger::LedgerKind::Expense, expense.id, None)
            .await
            .unwrap();

        let report = reports.build(&ReportQuery::default()).await.unwrap();
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.summary.total_expense, Decimal::new(250, 0));
    }

    #[tokio::test]
    async fn test_export_formats() {
        let (reports, _, _) = services();
        reports.import_csv(IMPORT, None).await.unwrap();

        let mut query = ReportQuery {
            kind: ReportKind::Category,
            format: ReportFormat::Csv,
            lang: ReportLanguage::Mr,
            ..Default::default()
        };
        match reports.export(&query).await.unwrap() {
            ReportOutput::File(file) => {
                assert_eq!(file.content_type, "text/csv; charset=utf-8");
                assert!(file.filename.starts_with("report-category-"));
                assert!(file.filename.ends_with(".csv"));
                let text = String::from_utf8(file.body).unwrap();
                assert!(text.contains("वर्ग"));
                assert!(text.contains("Rent,1,6000.00"));
            }
            ReportOutput::Json(_) => panic!("expected a file"),
        }

        query.format = ReportFormat::Pdf;
        match reports.export(&query).await.unwrap() {
            ReportOutput::File(file) => {
                assert_eq!(file.content_type, "application/pdf");
                assert!(file.body.starts_with(b"%PDF"));
            }
            ReportOutput::Json(_) => panic!("expected a file"),
        }

        query.format = ReportFormat::Json;
        assert!(matches!(
            reports.export(&query).await.unwrap(),
            ReportOutput::Json(_)
        ));
    }

    #[tokio::test]
    async fn test_bad_month_is_a_validation_error() {
        let (reports, _, _) = services();
        let query = ReportQuery {
            month: Some("2026/02".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            reports.build(&query).await,
            Err(temple_admin_api::ApiError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let (reports, _, rent) = services();
        for number in ["D-1", "D-2"] {
            rent.create_shop(
                CreateShopRequest {
                    shop_number: number.to_string(),
                    size: String::new(),
                    monthly_rent: Decimal::new(3000, 0),
                    deposit: Decimal::ZERO,
                    description: None,
                },
                None,
            )
            .await
            .unwrap();
        }
        reports.import_csv(IMPORT, None).await.unwrap();

        let dashboard = reports.dashboard().await.unwrap();
        assert_eq!(dashboard.shops_total, 2);
        assert_eq!(dashboard.shops_vacant, 2);
        assert_eq!(dashboard.active_agreements, 0);
        assert_eq!(dashboard.loans_outstanding, Decimal::ZERO);
        assert_eq!(dashboard.summary.total_income, Decimal::new(7000, 0));
    }
}
