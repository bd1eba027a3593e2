use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use std::error::Error;
use std::sync::Arc;
use temple_admin_api::ReceiptKind;
use temple_admin_db::repository::ReceiptCounterRepository;

/// One row per receipt kind; the upsert increments atomically.
pub struct ReceiptCounterRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ReceiptCounterRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceiptCounterRepository<Postgres> for ReceiptCounterRepositoryImpl {
    async fn next_value(&self, kind: ReceiptKind) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO receipt_counter (kind, last_value) VALUES ($1, 1)
            ON CONFLICT (kind) DO UPDATE SET last_value = receipt_counter.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(kind)
        .fetch_one(&*self.pool)
        .await?;
        Ok(value)
    }

    async fn peek_next_value(&self, kind: ReceiptKind) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let current: Option<i64> =
            sqlx::query_scalar("SELECT last_value FROM receipt_counter WHERE kind = $1")
                .bind(kind)
                .fetch_optional(&*self.pool)
                .await?;
        Ok(current.unwrap_or(0) + 1)
    }
}
