use async_trait::async_trait;
use sqlx::Database;
use temple_admin_api::ReceiptKind;
use uuid::Uuid;

use crate::models::ledger::TransactionModel;
use crate::repository::{CreateBatch, Load, LoadAll, LoadBatch, LoadPage, UpdateBatch};

type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Transaction store. Soft-deleted rows are still returned; filtering on
/// `is_deleted` is the caller's concern.
#[async_trait]
pub trait TransactionRepository<DB: Database>:
    CreateBatch<DB, TransactionModel>
    + LoadBatch<DB, TransactionModel>
    + Load<DB, TransactionModel>
    + UpdateBatch<DB, TransactionModel>
    + LoadAll<DB, TransactionModel>
    + LoadPage<DB, TransactionModel>
{
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> RepoResult<Option<TransactionModel>>;

    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> RepoResult<Vec<TransactionModel>>;
}

/// Monotonic per-kind receipt counters.
#[async_trait]
pub trait ReceiptCounterRepository<DB: Database>: Send + Sync {
    /// Allocates and returns the next value for `kind` (first allocation returns 1).
    async fn next_value(&self, kind: ReceiptKind) -> RepoResult<i64>;

    /// The value the next allocation would return, without allocating.
    async fn peek_next_value(&self, kind: ReceiptKind) -> RepoResult<i64>;
}
