use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::TransactionRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, TransactionModel> for TransactionRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<TransactionModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO transactions (id, date, transaction_type, category, sub_category, description, amount,
                    receipt_number, payment_mode, donor_name, donor_contact, donor_address,
                    family_members, amount_per_person, payee_name, payee_contact, tenant_id,
                    shop_id, agreement_id, loan_id, penalty_id, is_deleted, created_at,
                    created_by, audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $23, $24, $25)
                "#,
            )
            .bind(item.id)
            .bind(item.date)
            .bind(item.transaction_type)
            .bind(&item.category)
            .bind(&item.sub_category)
            .bind(&item.description)
            .bind(item.amount)
            .bind(item.receipt_str())
            .bind(&item.payment_mode)
            .bind(&item.donor_name)
            .bind(&item.donor_contact)
            .bind(&item.donor_address)
            .bind(item.family_members)
            .bind(item.amount_per_person)
            .bind(&item.payee_name)
            .bind(&item.payee_contact)
            .bind(item.tenant_id)
            .bind(item.shop_id)
            .bind(item.agreement_id)
            .bind(item.loan_id)
            .bind(item.penalty_id)
            .bind(item.is_deleted)
            .bind(item.created_at)
            .bind(item.created_by)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted into transactions");
        Ok(saved_items)
    }
}
