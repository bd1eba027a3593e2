use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::{ExistByIds, Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<UserModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "users", ids).await
    }
}

#[async_trait]
impl Load<Postgres, UserModel> for UserRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<UserModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "users", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("User not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, UserModel> for UserRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "users", "username").await
    }
}

#[async_trait]
impl ExistByIds<Postgres> for UserRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        utils::exist_by_ids(&self.pool, "users", ids).await
    }
}
