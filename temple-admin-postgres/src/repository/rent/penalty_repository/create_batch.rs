use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::RentPenaltyModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::PenaltyRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, RentPenaltyModel> for PenaltyRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<RentPenaltyModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<RentPenaltyModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO rent_penalties (id, agreement_id, due_date, rent_amount, penalty_rate, penalty_amount,
                    status, paid_date, reason, created_at, audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
            .bind(item.created_at)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted into rent_penalties");
        Ok(saved_items)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::*;
    use serial_test::serial;
    use temple_admin_db::repository::{CreateBatch, Load, UpdateBatch};

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_create_and_update() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = ctx.repos.penalty_repository();

        let agreement = ctx.create_test_agreement().await?;
        let mut item = create_test_penalty(&agreement);
        let audit_log_id = ctx.audit_log().await?;
        let saved = repo.create_batch(vec![item.clone()], Some(audit_log_id)).await?;
        assert_eq!(saved[0].audit_log_id, Some(audit_log_id));

        item.status = temple_admin_api::PenaltyStatus::Paid;
        item.paid_date = Some(item.due_date);
        let updated = repo.update_batch(vec![item.clone()], None).await?;
        assert_eq!(updated.len(), 1);

        let reloaded = repo.load(item.id).await?;
        assert_eq!(reloaded.paid_date, Some(item.due_date));
        Ok(())
    }
}
