use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading multiple records by their IDs
///
/// Returns records in the same order as the provided IDs; missing records
/// are represented as `None`.
/// 
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type
///
/// # Example
/// ```ignore
/// impl LoadBatch<Postgres, TenantModel> for TenantRepositoryImpl {
///     async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<TenantModel>>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait LoadBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Load multiple records by primary key
    ///
    /// # Arguments
    /// * `ids` - Primary keys of the records to load
    /// 
    /// # Returns
    /// * `Ok(Vec<Option<T>>)` - One slot per requested id, `None` where absent
    /// * `Err` - An error if the query could not be executed
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<T>>, Box<dyn std::error::Error + Send + Sync>>;
}