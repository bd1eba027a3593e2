use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::LoanModel;
use temple_admin_db::repository::{Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::LoanRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, LoanModel> for LoanRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<LoanModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "loans", ids).await
    }
}

#[async_trait]
impl Load<Postgres, LoanModel> for LoanRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<LoanModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "loans", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("Loan not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, LoanModel> for LoanRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<LoanModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "loans", "loan_date, created_at").await
    }
}
