use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::repository::{LoadPage, Page, PageRequest, TransactionRepository};
use uuid::Uuid;

use crate::utils::{get_optional_heapless_string, TryFromRow};

pub struct TransactionRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl TransactionRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for TransactionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(TransactionModel {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            transaction_type: row.try_get("transaction_type")?,
            category: row.try_get("category")?,
            sub_category: row.try_get("sub_category")?,
            description: row.try_get("description")?,
            amount: row.try_get("amount")?,
            receipt_number: get_optional_heapless_string(row, "receipt_number")?,
            payment_mode: row.try_get("payment_mode")?,
            donor_name: row.try_get("donor_name")?,
            donor_contact: row.try_get("donor_contact")?,
            donor_address: row.try_get("donor_address")?,
            family_members: row.try_get("family_members")?,
            amount_per_person: row.try_get("amount_per_person")?,
            payee_name: row.try_get("payee_name")?,
            payee_contact: row.try_get("payee_contact")?,
            tenant_id: row.try_get("tenant_id")?,
            shop_id: row.try_get("shop_id")?,
            agreement_id: row.try_get("agreement_id")?,
            loan_id: row.try_get("loan_id")?,
            penalty_id: row.try_get("penalty_id")?,
            is_deleted: row.try_get("is_deleted")?,
            created_at: row.try_get("created_at")?,
            created_by: row.try_get("created_by")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl LoadPage<Postgres, TransactionModel> for TransactionRepositoryImpl {
    async fn load_page(
        &self,
        page: PageRequest,
    ) -> Result<Page<TransactionModel>, Box<dyn Error + Send + Sync>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&*self.pool)
            .await?;

        let rows = sqlx::query(
            "SELECT * FROM transactions ORDER BY date DESC, created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit as i64)
        .bind(page.offset as i64)
        .fetch_all(&*self.pool)
        .await?;

        let items = rows
            .iter()
            .map(TransactionModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl TransactionRepository<Postgres> for TransactionRepositoryImpl {
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> Result<Option<TransactionModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM transactions WHERE receipt_number = $1")
            .bind(receipt_number)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(TransactionModel::try_from_row).transpose()
    }

    async fn find_by_agreement_id(
        &self,
        agreement_id: Uuid,
    ) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            "SELECT * FROM transactions WHERE agreement_id = $1 ORDER BY date, created_at",
        )
        .bind(agreement_id)
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(TransactionModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{create_test_donation, setup_test_context, unique_receipt_number};
    use serial_test::serial;
    use temple_admin_db::repository::{CreateBatch, LoadPage, PageRequest, TransactionRepository};

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_find_by_receipt_number_and_page() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = ctx.repos.transaction_repository();

        let receipt = unique_receipt_number();
        let donation = create_test_donation(&receipt);
        repo.create_batch(vec![donation.clone()], None).await?;

        let found = repo.find_by_receipt_number(&receipt).await?;
        assert_eq!(found.map(|t| t.id), Some(donation.id));

        let page = repo.load_page(PageRequest::new(10, 0)).await?;
        assert!(page.total >= 1);
        assert!(page.items.len() <= 10);
        Ok(())
    }
}
