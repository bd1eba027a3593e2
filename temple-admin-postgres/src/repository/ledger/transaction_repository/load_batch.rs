use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::repository::{Load, LoadAll, LoadBatch};
use uuid::Uuid;

use super::repo_impl::TransactionRepositoryImpl;
use crate::utils;

#[async_trait]
impl LoadBatch<Postgres, TransactionModel> for TransactionRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<TransactionModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "transactions", ids).await
    }
}

#[async_trait]
impl Load<Postgres, TransactionModel> for TransactionRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<TransactionModel, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "transactions", &[id])
            .await?
            .pop()
            .flatten()
            .ok_or_else(|| format!("Transaction not found: {id}").into())
    }
}

#[async_trait]
impl LoadAll<Postgres, TransactionModel> for TransactionRepositoryImpl {
    async fn load_all(&self) -> Result<Vec<TransactionModel>, Box<dyn Error + Send + Sync>> {
        utils::load_all(&self.pool, "transactions", "date DESC, created_at DESC").await
    }
}
