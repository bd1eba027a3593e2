use sqlx::Database;
use std::sync::Arc;
use temple_admin_api::ApiResult;
use temple_admin_db::models::audit::AuditLogModel;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::models::rent::{
    AgreementModel, LoanModel, RentPenaltyModel, ShopModel, TenantModel,
};
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::memory::{InMemoryReceiptCounter, InMemoryRepository};
use temple_admin_db::repository::{
    AgreementRepository, AuditLogRepository, LoanRepository, PenaltyRepository,
    ReceiptCounterRepository, ShopRepository, TenantRepository, TransactionRepository,
    UserRepository,
};
use uuid::Uuid;

use crate::support::{audit, require};

/// Every store the services read and write, as shared trait objects.
pub struct Repositories<DB: Database> {
    pub shops: Arc<dyn ShopRepository<DB>>,
    pub tenants: Arc<dyn TenantRepository<DB>>,
    pub agreements: Arc<dyn AgreementRepository<DB>>,
    pub loans: Arc<dyn LoanRepository<DB>>,
    pub penalties: Arc<dyn PenaltyRepository<DB>>,
    pub transactions: Arc<dyn TransactionRepository<DB>>,
    pub receipt_counters: Arc<dyn ReceiptCounterRepository<DB>>,
    pub users: Arc<dyn UserRepository<DB>>,
    pub audit_logs: Arc<dyn AuditLogRepository<DB>>,
}

impl<DB: Database> Clone for Repositories<DB> {
    fn clone(&self) -> Self {
        Self {
            shops: self.shops.clone(),
            tenants: self.tenants.clone(),
            agreements: self.agreements.clone(),
            loans: self.loans.clone(),
            penalties: self.penalties.clone(),
            transactions: self.transactions.clone(),
            receipt_counters: self.receipt_counters.clone(),
            users: self.users.clone(),
            audit_logs: self.audit_logs.clone(),
        }
    }
}

impl<DB: Database> Repositories<DB> {
    /// Process-local stores; state is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            shops: Arc::new(InMemoryRepository::<ShopModel>::new()),
            tenants: Arc::new(InMemoryRepository::<TenantModel>::new()),
            agreements: Arc::new(InMemoryRepository::<AgreementModel>::new()),
            loans: Arc::new(InMemoryRepository::<LoanModel>::new()),
            penalties: Arc::new(InMemoryRepository::<RentPenaltyModel>::new()),
            transactions: Arc::new(InMemoryRepository::<TransactionModel>::new()),
            receipt_counters: Arc::new(InMemoryReceiptCounter::new()),
            users: Arc::new(InMemoryRepository::<UserModel>::new()),
            audit_logs: Arc::new(InMemoryRepository::<AuditLogModel>::new()),
        }
    }
}

impl<DB: Database> Repositories<DB> {
    pub async fn shop(&self, id: Uuid) -> ApiResult<ShopModel> {
        require::<DB, ShopModel, _>(&*self.shops, "Shop", id).await
    }

    pub async fn tenant(&self, id: Uuid) -> ApiResult<TenantModel> {
        require::<DB, TenantModel, _>(&*self.tenants, "Tenant", id).await
    }

    pub async fn agreement(&self, id: Uuid) -> ApiResult<AgreementModel> {
        require::<DB, AgreementModel, _>(&*self.agreements, "Agreement", id).await
    }

    pub async fn loan(&self, id: Uuid) -> ApiResult<LoanModel> {
        require::<DB, LoanModel, _>(&*self.loans, "Loan", id).await
    }

    pub async fn penalty(&self, id: Uuid) -> ApiResult<RentPenaltyModel> {
        require::<DB, RentPenaltyModel, _>(&*self.penalties, "Penalty", id).await
    }

    pub async fn transaction(&self, id: Uuid) -> ApiResult<TransactionModel> {
        require::<DB, TransactionModel, _>(&*self.transactions, "Transaction", id).await
    }

    pub async fn user(&self, id: Uuid) -> ApiResult<UserModel> {
        require::<DB, UserModel, _>(&*self.users, "User", id).await
    }

    /// Records one audit log entry and returns its id.
    pub async fn audit(&self, actor: Option<Uuid>, action: &str) -> ApiResult<Uuid> {
        audit::<DB, _>(&*self.audit_logs, actor, action).await
    }
}
