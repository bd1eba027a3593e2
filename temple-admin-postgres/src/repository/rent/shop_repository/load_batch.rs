use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::ShopModel;
use temple_admin_db::repository::{ExistByIds, Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::ShopRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, ShopModel> for ShopRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<ShopModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "shops", ids).await
    }
}

#[async_trait]
impl Load<Postgres, ShopModel> for ShopRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ShopModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "shops", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("Shop not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, ShopModel> for ShopRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<ShopModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "shops", "shop_number").await
    }
}

#[async_trait]
impl ExistByIds<Postgres> for ShopRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        utils::exist_by_ids(&self.pool, "shops", ids).await
    }
}
