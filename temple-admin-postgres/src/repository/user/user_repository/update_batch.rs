use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<UserModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE users
                SET username = $2, email = $3, password_hash = $4, role = $5, status = $6,
                    last_login = $7, audit_log_id = $8
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.username.as_str())
            .bind(&item.email)
            .bind(&item.password_hash)
            .bind(item.role)
            .bind(item.status)
            .bind(item.last_login)
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
