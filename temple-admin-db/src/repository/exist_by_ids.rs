use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for checking existence of multiple records by their IDs
///
/// # Example
/// ```ignore
/// let results = tenant_repository.exist_by_ids(&[tenant_id]).await?;
/// assert_eq!(results, vec![(tenant_id, true)]);
/// ```
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    /// Check existence of multiple records
    ///
    /// # Returns
    /// * `Ok(Vec<(Uuid, bool)>)` - Each requested id paired with its existence, in request order
    /// * `Err` - An error if the query could not be executed
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
