use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::rent::LoanModel;
use temple_admin_db::repository::LoanRepository;
use uuid::Uuid;

use crate::utils::TryFromRow;

pub struct LoanRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl LoanRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for LoanModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(LoanModel {
            id: row.try_get("id")?,
            tenant_id: row.try_get("tenant_id")?,
            agreement_id: row.try_get("agreement_id")?,
            principal: row.try_get("principal")?,
            interest_rate: row.try_get("interest_rate")?,
            duration_months: row.try_get("duration_months")?,
            emi_amount: row.try_get("emi_amount")?,
            outstanding_balance: row.try_get("outstanding_balance")?,
            total_repaid: row.try_get("total_repaid")?,
            status: row.try_get("status")?,
            loan_date: row.try_get("loan_date")?,
            next_emi_date: row.try_get("next_emi_date")?,
            last_payment_date: row.try_get("last_payment_date")?,
            created_at: row.try_get("created_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl LoanRepository<Postgres> for LoanRepositoryImpl {
    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> Result<Vec<LoanModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query("SELECT * FROM loans WHERE agreement_id = $1 ORDER BY loan_date, created_at")
            .bind(agreement_id)
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(LoanModel::try_from_row).collect()
    }
}
