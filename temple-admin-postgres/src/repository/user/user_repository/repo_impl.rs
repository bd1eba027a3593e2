use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::UserRepository;

use crate::utils::{get_heapless_string, TryFromRow};

pub struct UserRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl UserRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for UserModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UserModel {
            id: row.try_get("id")?,
            username: get_heapless_string(row, "username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
            status: row.try_get("status")?,
            last_login: row.try_get("last_login")?,
            created_at: row.try_get("created_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl UserRepository<Postgres> for UserRepositoryImpl {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(UserModel::try_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(UserModel::try_from_row).transpose()
    }

    async fn count(&self) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{create_test_user, setup_test_context, unique_username};
    use serial_test::serial;
    use temple_admin_db::repository::{CreateBatch, UserRepository};

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_find_by_username_and_email() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = ctx.repos.user_repository();

        let user = create_test_user(&unique_username());
        repo.create_batch(vec![user.clone()], None).await?;

        let by_name = repo.find_by_username(user.username.as_str()).await?;
        assert_eq!(by_name.map(|u| u.id), Some(user.id));

        let by_email = repo.find_by_email(&user.email.to_uppercase()).await?;
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
        assert!(repo.count().await? >= 1);
        Ok(())
    }
}
