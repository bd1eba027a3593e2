use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::TenantModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::TenantRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, TenantModel> for TenantRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<TenantModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<TenantModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO tenants (id, name, phone, email, address, business_type, status, created_at,
                    audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(item.phone.as_str())
            .bind(&item.email)
            .bind(&item.address)
            .bind(&item.business_type)
            .bind(item.status)
            .bind(item.created_at)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted into tenants");
        Ok(saved_items)
    }
}
