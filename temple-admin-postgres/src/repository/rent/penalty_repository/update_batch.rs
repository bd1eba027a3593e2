use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::RentPenaltyModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::PenaltyRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, RentPenaltyModel> for PenaltyRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<RentPenaltyModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<RentPenaltyModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE rent_penalties
                SET agreement_id = $2, due_date = $3, rent_amount = $4, penalty_rate = $5,
                    penalty_amount = $6, status = $7, paid_date = $8, reason = $9,
                    audit_log_id = $10
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.agreement_id)
            .bind(item.due_date)
            .bind(item.rent_amount)
            .bind(item.penalty_rate)
            .bind(item.penalty_amount)
            .bind(item.status)
            .bind(item.paid_date)
            .bind(&item.reason)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() > 0 {
                updated_items.push(item);
            }
        }
        tx.commit().await?;
        Ok(updated_items)
    }
}
