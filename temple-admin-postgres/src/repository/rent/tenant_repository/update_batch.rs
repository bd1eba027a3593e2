use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::TenantModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::TenantRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, TenantModel> for TenantRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<TenantModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<TenantModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE tenants
                SET name = $2, phone = $3, email = $4, address = $5, business_type = $6,
                    status = $7, audit_log_id = $8
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(item.phone.as_str())
            .bind(&item.email)
            .bind(&item.address)
            .bind(&item.business_type)
            .bind(item.status)
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
