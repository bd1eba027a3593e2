use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::rent::ShopModel;
use temple_admin_db::repository::ShopRepository;

use crate::utils::{get_heapless_string, TryFromRow};

pub struct ShopRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ShopRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ShopModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ShopModel {
            id: row.try_get("id")?,
            shop_number: get_heapless_string(row, "shop_number")?,
            size: row.try_get("size")?,
            monthly_rent: row.try_get("monthly_rent")?,
            deposit: row.try_get("deposit")?,
            status: row.try_get("status")?,
            description: row.try_get("description")?,
            tenant_id: row.try_get("tenant_id")?,
            agreement_id: row.try_get("agreement_id")?,
            created_at: row.try_get("created_at")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

#[async_trait]
impl ShopRepository<Postgres> for ShopRepositoryImpl {
    async fn find_by_shop_number(
        &self,
        shop_number: &str,
    ) -> Result<Option<ShopModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query("SELECT * FROM shops WHERE LOWER(shop_number) = LOWER($1)")
            .bind(shop_number)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(ShopModel::try_from_row).transpose()
    }
}
