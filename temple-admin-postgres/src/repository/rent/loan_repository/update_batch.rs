use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::LoanModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::LoanRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, LoanModel> for LoanRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<LoanModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<LoanModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE loans
                SET tenant_id = $2, agreement_id = $3, principal = $4, interest_rate = $5,
                    duration_months = $6, emi_amount = $7, outstanding_balance = $8,
                    total_repaid = $9, status = $10, loan_date = $11, next_emi_date = $12,
                    last_payment_date = $13, audit_log_id = $14
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.tenant_id)
            .bind(item.agreement_id)
            .bind(item.principal)
            .bind(item.interest_rate)
            .bind(item.duration_months)
            .bind(item.emi_amount)
            .bind(item.outstanding_balance)
            .bind(item.total_repaid)
            .bind(item.status)
            .bind(item.loan_date)
            .bind(item.next_emi_date)
            .bind(item.last_payment_date)
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
