use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::RentPenaltyModel;
use temple_admin_db::repository::{Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::PenaltyRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, RentPenaltyModel> for PenaltyRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<RentPenaltyModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "rent_penalties", ids).await
    }
}

#[async_trait]
impl Load<Postgres, RentPenaltyModel> for PenaltyRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<RentPenaltyModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "rent_penalties", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("Penalty not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, RentPenaltyModel> for PenaltyRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<RentPenaltyModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "rent_penalties", "due_date, created_at").await
    }
}
