use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::repository::DeleteBatch;
use uuid::Uuid;

use super::repo_impl::ShopRepositoryImpl;
use crate::utils;

#[async_trait]
impl DeleteBatch<Postgres> for ShopRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        _audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        utils::delete_by_ids(&self.pool, "shops", ids).await
    }
}
