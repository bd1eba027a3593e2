use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::auditable::Auditable;

/// Generic repository trait for creating multiple records in a batch
///
/// Any record implementing [`Auditable`] can be created through this trait.
/// Implementations stamp each record with `audit_log_id` before persisting it
/// and perform all inserts atomically where the store supports it.
/// 
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type
///
/// # Example
/// ```ignore
/// impl CreateBatch<Postgres, ShopModel> for ShopRepositoryImpl {
///     async fn create_batch(&self, items: Vec<ShopModel>, audit_log_id: Option<Uuid>) -> Result<Vec<ShopModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Auditable>: Send + Sync {
    /// Save multiple records
    ///
    /// # Arguments
    /// * `items` - The records to create
    /// * `audit_log_id` - The audit log entry of the operation, if any
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The created records, stamped with `audit_log_id`
    /// * `Err` - An error if the insert failed, including unique key violations
    async fn create_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}