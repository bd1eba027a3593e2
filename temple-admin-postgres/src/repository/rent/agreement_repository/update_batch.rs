use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::AgreementModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::AgreementRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, AgreementModel> for AgreementRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<AgreementModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<AgreementModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE agreements
                SET shop_id = $2, tenant_id = $3, agreement_date = $4, duration_months = $5,
                    monthly_rent = $6, security_deposit = $7, advance_rent = $8,
                    agreement_type = $9, status = $10, next_due_date = $11,
                    last_payment_date = $12, active_loan_id = $13, pending_penalty_ids = $14,
                    audit_log_id = $15
                WHERE id = $1
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
