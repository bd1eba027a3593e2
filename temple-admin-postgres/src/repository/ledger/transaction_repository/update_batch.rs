use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::TransactionRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, TransactionModel> for TransactionRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<TransactionModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE transactions
                SET date = $2, transaction_type = $3, category = $4, sub_category = $5,
                    description = $6, amount = $7, receipt_number = $8, payment_mode = $9,
                    donor_name = $10, donor_contact = $11, donor_address = $12,
                    family_members = $13, amount_per_person = $14, payee_name = $15,
                    payee_contact = $16, tenant_id = $17, shop_id = $18, agreement_id = $19,
                    loan_id = $20, penalty_id = $21, is_deleted = $22, created_by = $23,
                    audit_log_id = $24
                WHERE id = $1
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
            .bind(item.created_by)
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
