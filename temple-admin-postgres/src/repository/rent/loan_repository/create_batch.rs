use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::LoanModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::LoanRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, LoanModel> for LoanRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<LoanModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<LoanModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO loans (id, tenant_id, agreement_id, principal, interest_rate, duration_months,
                    emi_amount, outstanding_balance, total_repaid, status, loan_date,
                    next_emi_date, last_payment_date, created_at, audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
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
            .bind(item.created_at)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted into loans");
        Ok(saved_items)
    }
}
