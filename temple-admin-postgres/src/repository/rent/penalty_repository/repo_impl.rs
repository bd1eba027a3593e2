use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::rent::RentPenaltyModel;
use temple_admin_db::repository::PenaltyRepository;
use uuid::Uuid;

use crate::utils::TryFromRow;

pub struct PenaltyRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl PenaltyRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for RentPenaltyModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(RentPenaltyModel {
            id: row.try_get("id")?,
            agreement_id: row.try_get("agreement_id")?,
            due_date: row.try_get("due_date")?,
            rent_amount: row.try_get("rent_amount")?,
            penalty_rate: row.try_get("penalty_rate")?,
            penalty_amount: row.try_get("penalty_amount")?,
            status: row.try_get("status")?,
            paid_date: row.try_get("paid_date")?,
            reason: row.try_get("reason")?,
            created_at: row.try_get("created_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl PenaltyRepository<Postgres> for PenaltyRepositoryImpl {
    async fn find_by_agreement_id(
        &self,
        agreement_id: Uuid,
    ) -> Result<Vec<RentPenaltyModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            "SELECT * FROM rent_penalties WHERE agreement_id = $1 ORDER BY due_date, created_at",
        )
        .bind(agreement_id)
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(RentPenaltyModel::try_from_row).collect()
    }
}
