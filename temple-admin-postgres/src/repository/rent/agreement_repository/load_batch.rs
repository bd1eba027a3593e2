use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::AgreementModel;
use temple_admin_db::repository::{Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::AgreementRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, AgreementModel> for AgreementRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<AgreementModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "agreements", ids).await
    }
}

#[async_trait]
impl Load<Postgres, AgreementModel> for AgreementRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<AgreementModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "agreements", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("Agreement not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, AgreementModel> for AgreementRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<AgreementModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "agreements", "agreement_date, created_at").await
    }
}
