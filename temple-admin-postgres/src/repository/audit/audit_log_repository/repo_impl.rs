use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use temple_admin_db::models::audit::AuditLogModel;
use temple_admin_db::repository::{AuditLogRepository, LoadBatch};
use uuid::Uuid;

use crate::utils::{self, TryFromRow};

pub struct AuditLogRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl AuditLogRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for AuditLogModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AuditLogModel {
            id: row.try_get("id")?,
            updated_at: row.try_get("updated_at")?,
            updated_by_user_id: row.try_get("updated_by_user_id")?,
            action: row.try_get("action")?,
        })
    }
}

#[async_trait]
impl LoadBatch<Postgres, AuditLogModel> for AuditLogRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<AuditLogModel>>, Box<dyn Error + Send + Sync>> {
        utils::load_by_ids(&self.pool, "audit_log", ids).await
    }
}

#[async_trait]
impl AuditLogRepository<Postgres> for AuditLogRepositoryImpl {
    async fn create(&self, audit_log: &AuditLogModel) -> Result<AuditLogModel, Box<dyn Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, updated_at, updated_by_user_id, action)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(audit_log.id)
        .bind(audit_log.updated_at)
        .bind(audit_log.updated_by_user_id)
        .bind(&audit_log.action)
        .execute(&*self.pool)
        .await?;

        Ok(audit_log.clone())
    }
}
