use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::CreateBatch;
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<UserModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            sqlx::query(
                r#"
                INSERT INTO users (id, username, email, password_hash, role, status, last_login, created_at,
                    audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.username.as_str())
            .bind(&item.email)
            .bind(&item.password_hash)
            .bind(item.role)
            .bind(item.status)
            .bind(item.last_login)
            .bind(item.created_at)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            saved_items.push(item);
        }
        tx.commit().await?;

        debug!(count = saved_items.len(), "inserted into users");
        Ok(saved_items)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::*;
    use serial_test::serial;
    use temple_admin_db::repository::{CreateBatch, Load, UpdateBatch};

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_create_and_update() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = ctx.repos.user_repository();

        let mut item = create_test_user(&unique_username());
        let audit_log_id = ctx.audit_log().await?;
        let saved = repo.create_batch(vec![item.clone()], Some(audit_log_id)).await?;
        assert_eq!(saved[0].audit_log_id, Some(audit_log_id));

        item.role = temple_admin_api::UserRole::Treasurer;
        let updated = repo.update_batch(vec![item.clone()], None).await?;
        assert_eq!(updated.len(), 1);

        let reloaded = repo.load(item.id).await?;
        assert_eq!(reloaded.role, temple_admin_api::UserRole::Treasurer);
        Ok(())
    }
}
