use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::AgreementModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::AgreementRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, AgreementModel> for AgreementRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AgreementModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<AgreementModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO agreements (id, shop_id, tenant_id, agreement_date, duration_months, monthly_rent,
                    security_deposit, advance_rent, agreement_type, status, next_due_date,
                    last_payment_date, active_loan_id, pending_penalty_ids, created_at,
                    audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                "#,
            )
            .bind(item.id)
            .bind(item.shop_id)
            .bind(item.tenant_id)
            .bind(item.agreement_date)
            .bind(item.duration_months)
            .bind(item.monthly_rent)
            .bind(item.security_deposit)
            .bind(item.advance_rent)
            .bind(item.agreement_type)
            .bind(item.status)
            .bind(item.next_due_date)
            .bind(item.last_payment_date)
            .bind(item.active_loan_id)
            .bind(&item.pending_penalty_ids)
            .bind(item.created_at)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted into agreements");
        Ok(saved_items)
    }
}
