use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::ShopModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::ShopRepositoryImpl;

impl ShopRepositoryImpl {
    pub(super) async fn create_batch_impl(
        &self,
        items: Vec<ShopModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ShopModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO shops (id, shop_number, size, monthly_rent, deposit, status,
                    description, tenant_id, agreement_id, created_at, audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(item.id)
            .bind(item.shop_number.as_str())
            .bind(&item.size)
            .bind(item.monthly_rent)
            .bind(item.deposit)
            .bind(item.status)
            .bind(&item.description)
            .bind(item.tenant_id)
            .bind(item.agreement_id)
            .bind(item.created_at)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted shops");
        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ShopModel> for ShopRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ShopModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ShopModel>, Box<dyn Error + Send + Sync>> {
        self.create_batch_impl(items, audit_log_id).await
    }
}
