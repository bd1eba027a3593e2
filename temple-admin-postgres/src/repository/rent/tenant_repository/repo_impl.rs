use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::rent::TenantModel;

use crate::utils::{get_heapless_string, TryFromRow};

/// `TenantRepository` is satisfied through its blanket impl.
pub struct TenantRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl TenantRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for TenantModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(TenantModel {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: get_heapless_string(row, "phone")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            business_type: row.try_get("business_type")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}
