use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading a single record that is expected to exist
///
/// Unlike [`crate::repository::LoadBatch`], a missing record is an error; use
/// `load_batch` when absence is a normal outcome.
///
/// # Example
/// ```ignore
/// let shop = shop_repository.load(shop_id).await?;
/// ```
#[async_trait]
pub trait Load<DB: Database, T: Identifiable>: Send + Sync {
    /// Load a record by primary key
    ///
    /// # Returns
    /// * `Ok(T)` - The loaded record
    /// * `Err` - If the record does not exist or the query failed
    async fn load(&self, id: Uuid) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
