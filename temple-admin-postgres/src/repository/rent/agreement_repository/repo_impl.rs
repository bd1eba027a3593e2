use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::rent::AgreementModel;
use temple_admin_db::repository::AgreementRepository;
use uuid::Uuid;

use crate::utils::TryFromRow;

pub struct AgreementRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl AgreementRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_by_column(
        &self,
        column: &str,
        value: Uuid,
    ) -> Result<Vec<AgreementModel>, Box<dyn Error + Send + Sync>> {
        let query = format!(
            "SELECT * FROM agreements WHERE {column} = $1 ORDER BY agreement_date, created_at"
        );
        let rows = sqlx::query(&query).bind(value).fetch_all(&*self.pool).await?;
        rows.iter().map(AgreementModel::try_from_row).collect()
    }
}

impl TryFromRow<PgRow> for AgreementModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AgreementModel {
            id: row.try_get("id")?,
            shop_id: row.try_get("shop_id")?,
            tenant_id: row.try_get("tenant_id")?,
            agreement_date: row.try_get("agreement_date")?,
            duration_months: row.try_get("duration_months")?,
            monthly_rent: row.try_get("monthly_rent")?,
            security_deposit: row.try_get("security_deposit")?,
            advance_rent: row.try_get("advance_rent")?,
            agreement_type: row.try_get("agreement_type")?,
            status: row.try_get("status")?,
            next_due_date: row.try_get("next_due_date")?,
            last_payment_date: row.try_get("last_payment_date")?,
            active_loan_id: row.try_get("active_loan_id")?,
            pending_penalty_ids: row.try_get("pending_penalty_ids")?,
            created_at: row.try_get("created_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl AgreementRepository<Postgres> for AgreementRepositoryImpl {
    async fn find_by_shop_id(&self, shop_id: Uuid) -> Result<Vec<AgreementModel>, Box<dyn Error + Send + Sync>> {
        self.find_by_column("shop_id", shop_id).await
    }

    async fn find_by_tenant_id(&self, tenant_id: Uuid) -> Result<Vec<AgreementModel>, Box<dyn Error + Send + Sync>> {
        self.find_by_column("tenant_id", tenant_id).await
    }
}
