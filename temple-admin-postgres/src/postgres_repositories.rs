use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::repository::{
    AgreementRepositoryImpl, AuditLogRepositoryImpl, LoanRepositoryImpl, PenaltyRepositoryImpl,
    ReceiptCounterRepositoryImpl, ShopRepositoryImpl, TenantRepositoryImpl,
    TransactionRepositoryImpl, UserRepositoryImpl,
};

/// Builds repositories sharing one connection pool. Each batch operation
/// runs in its own database transaction.
#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        Ok(Self::new(Arc::new(pool)))
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    pub fn shop_repository(&self) -> Arc<ShopRepositoryImpl> {
        Arc::new(ShopRepositoryImpl::new(self.pool.clone()))
    }

    pub fn tenant_repository(&self) -> Arc<TenantRepositoryImpl> {
        Arc::new(TenantRepositoryImpl::new(self.pool.clone()))
    }

    pub fn agreement_repository(&self) -> Arc<AgreementRepositoryImpl> {
        Arc::new(AgreementRepositoryImpl::new(self.pool.clone()))
    }

    pub fn loan_repository(&self) -> Arc<LoanRepositoryImpl> {
        Arc::new(LoanRepositoryImpl::new(self.pool.clone()))
    }

    pub fn penalty_repository(&self) -> Arc<PenaltyRepositoryImpl> {
        Arc::new(PenaltyRepositoryImpl::new(self.pool.clone()))
    }

    pub fn transaction_repository(&self) -> Arc<TransactionRepositoryImpl> {
        Arc::new(TransactionRepositoryImpl::new(self.pool.clone()))
    }

    pub fn receipt_counter_repository(&self) -> Arc<ReceiptCounterRepositoryImpl> {
        Arc::new(ReceiptCounterRepositoryImpl::new(self.pool.clone()))
    }

    pub fn user_repository(&self) -> Arc<UserRepositoryImpl> {
        Arc::new(UserRepositoryImpl::new(self.pool.clone()))
    }

    pub fn audit_log_repository(&self) -> Arc<AuditLogRepositoryImpl> {
        Arc::new(AuditLogRepositoryImpl::new(self.pool.clone()))
    }
}
