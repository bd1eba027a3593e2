use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::TenantModel;
use temple_admin_db::repository::{ExistByIds, Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::TenantRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, TenantModel> for TenantRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<TenantModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "tenants", ids).await
    }
}

#[async_trait]
impl Load<Postgres, TenantModel> for TenantRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<TenantModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "tenants", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("Tenant not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, TenantModel> for TenantRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<TenantModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "tenants", "name").await
    }
}

#[async_trait]
impl ExistByIds<Postgres> for TenantRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        utils::exist_by_ids(&self.pool, "tenants", ids).await
    }
}
