use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for hard-deleting multiple records in a batch
///
/// Referential checks (e.g. an occupied shop) belong to the service layer;
/// this trait removes rows unconditionally and reports how many existed.
///
/// # Example
/// ```ignore
/// impl DeleteBatch<Postgres> for ShopRepositoryImpl {
///     async fn delete_batch(&self, ids: &[Uuid], audit_log_id: Option<Uuid>) -> Result<usize, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait DeleteBatch<DB: Database>: Send + Sync {
    /// Delete multiple records by their IDs
    ///
    /// # Arguments
    /// * `ids` - Primary keys of the records to delete
    /// * `audit_log_id` - The audit log entry of the operation, if any
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of records deleted
    /// * `Err` - An error if the delete could not be executed
    async fn delete_batch(
        &self,
        ids: &[Uuid],
        audit_log_id: Option<Uuid>,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
