use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::Database;
use std::collections::HashMap;
use std::error::Error;
use std::cmp::Reverse;
use temple_admin_api::ReceiptKind;
use uuid::Uuid;

use super::repository::InMemoryRepository;
use crate::models::audit::AuditLogModel;
use crate::models::ledger::TransactionModel;
use crate::models::rent::{AgreementModel, LoanModel, RentPenaltyModel, ShopModel};
use crate::models::user::UserModel;
use crate::repository::{
    AgreementRepository, AuditLogRepository, LoadPage, LoanRepository, Page, PageRequest,
    PenaltyRepository, ReceiptCounterRepository, ShopRepository, TransactionRepository,
    UserRepository,
};

type RepoResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[async_trait]
impl<DB: Database> ShopRepository<DB> for InMemoryRepository<ShopModel> {
    async fn find_by_shop_number(&self, shop_number: &str) -> RepoResult<Option<ShopModel>> {
        Ok(self.find_first(|shop| shop.shop_number.as_str().eq_ignore_ascii_case(shop_number)))
    }
}

#[async_trait]
impl<DB: Database> AgreementRepository<DB> for InMemoryRepository<AgreementModel> {
    async fn find_by_shop_id(&self, shop_id: Uuid) -> RepoResult<Vec<AgreementModel>> {
        Ok(self.find_all(|agreement| agreement.shop_id == shop_id))
    }

    async fn find_by_tenant_id(&self, tenant_id: Uuid) -> RepoResult<Vec<AgreementModel>> {
        Ok(self.find_all(|agreement| agreement.tenant_id == tenant_id))
    }
}

#[async_trait]
impl<DB: Database> LoanRepository<DB> for InMemoryRepository<LoanModel> {
    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> RepoResult<Vec<LoanModel>> {
        Ok(self.find_all(|loan| loan.agreement_id == agreement_id))
    }
}

#[async_trait]
impl<DB: Database> PenaltyRepository<DB> for InMemoryRepository<RentPenaltyModel> {
    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> RepoResult<Vec<RentPenaltyModel>> {
        let mut penalties = self.find_all(|penalty| penalty.agreement_id == agreement_id);
        penalties.sort_by_key(|penalty| penalty.due_date);
        Ok(penalties)
    }
}

/// Newest first: transaction date, then creation time.
#[async_trait]
impl<DB: Database> LoadPage<DB, TransactionModel> for InMemoryRepository<TransactionModel> {
    async fn load_page(&self, page: PageRequest) -> RepoResult<Page<TransactionModel>> {
        let mut all = self.snapshot();
        all.sort_by_key(|tx| Reverse((tx.date, tx.created_at)));
        Ok(page.apply(&all))
    }
}

#[async_trait]
impl<DB: Database> TransactionRepository<DB> for InMemoryRepository<TransactionModel> {
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> RepoResult<Option<TransactionModel>> {
        Ok(self.find_first(|tx| tx.receipt_str() == Some(receipt_number)))
    }

    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> RepoResult<Vec<TransactionModel>> {
        Ok(self.find_all(|tx| tx.agreement_id == Some(agreement_id)))
    }
}

#[async_trait]
impl<DB: Database> UserRepository<DB> for InMemoryRepository<UserModel> {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserModel>> {
        Ok(self.find_first(|user| user.username.as_str() == username))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserModel>> {
        Ok(self.find_first(|user| user.email.eq_ignore_ascii_case(email)))
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.len())
    }
}

#[async_trait]
impl<DB: Database> AuditLogRepository<DB> for InMemoryRepository<AuditLogModel> {
    async fn create(&self, audit_log: &AuditLogModel) -> RepoResult<AuditLogModel> {
        self.insert_unique(audit_log.clone())
    }
}

/// Receipt counters held in a map keyed by kind.
#[derive(Default)]
pub struct InMemoryReceiptCounter {
    values: Mutex<HashMap<ReceiptKind, i64>>,
}

impl InMemoryReceiptCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<DB: Database> ReceiptCounterRepository<DB> for InMemoryReceiptCounter {
    async fn next_value(&self, kind: ReceiptKind) -> RepoResult<i64> {
        let mut values = self.values.lock();
        let value = values.entry(kind).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn peek_next_value(&self, kind: ReceiptKind) -> RepoResult<i64> {
        Ok(self.values.lock().get(&kind).copied().unwrap_or(0) + 1)
    }
}
