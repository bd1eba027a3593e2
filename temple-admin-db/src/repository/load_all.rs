use async_trait::async_trait;
use sqlx::Database;

use super::pagination::{Page, PageRequest};
use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading a whole collection
///
/// Collections in this domain are small (shops, tenants, agreements); callers
/// filter and aggregate in memory. Records are returned in creation order.
#[async_trait]
pub trait LoadAll<DB: Database, T: Identifiable>: Send + Sync {
    async fn load_all(&self) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Generic repository trait for offset-paginated listing, newest first
#[async_trait]
pub trait LoadPage<DB: Database, T: Identifiable>: Send + Sync {
    async fn load_page(
        &self,
        page: PageRequest,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
