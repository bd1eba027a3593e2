use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::auditable::Auditable;

/// Generic repository trait for updating multiple records in a batch
///
/// Updates replace the stored record wholesale (last write wins). Records that
/// no longer exist are skipped and omitted from the result.
/// 
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type
///
/// # Example
/// ```ignore
/// impl UpdateBatch<Postgres, LoanModel> for LoanRepositoryImpl {
///     async fn update_batch(&self, items: Vec<LoanModel>, audit_log_id: Option<Uuid>) -> Result<Vec<LoanModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Auditable>: Send + Sync {
    /// Update multiple records
    ///
    /// # Arguments
    /// * `items` - The records in their new state
    /// * `audit_log_id` - The audit log entry of the operation, if any
    /// 
    /// # Returns
    /// * `Ok(Vec<T>)` - The records that were found and updated
    /// * `Err` - An error if the transaction could not be executed
    async fn update_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}