use sqlx::Database;
use std::sync::Arc;
use temple_admin_api::{ApiError, ApiResult, ReceiptKind};
use temple_admin_db::repository::{ReceiptCounterRepository, TransactionRepository};
use tracing::debug;

/// Upper bound on counter values skipped because a receipt was taken manually.
const MAX_SKIPS: usize = 1000;

/// Allocates receipt numbers from the per-kind counters, skipping numbers
/// already present on a stored transaction.
pub struct ReceiptAllocator<DB: Database> {
    counters: Arc<dyn ReceiptCounterRepository<DB>>,
    transactions: Arc<dyn TransactionRepository<DB>>,
}

impl<DB: Database> Clone for ReceiptAllocator<DB> {
    fn clone(&self) -> Self {
        Self {
            counters: self.counters.clone(),
            transactions: self.transactions.clone(),
        }
    }
}

impl<DB: Database> ReceiptAllocator<DB> {
    pub fn new(
        counters: Arc<dyn ReceiptCounterRepository<DB>>,
        transactions: Arc<dyn TransactionRepository<DB>>,
    ) -> Self {
        Self {
            counters,
            transactions,
        }
    }

    pub async fn allocate(&self, kind: ReceiptKind) -> ApiResult<String> {
        for _ in 0..MAX_SKIPS {
            let candidate = kind.format(self.counters.next_value(kind).await?);
            if !self.is_taken(&candidate).await? {
                debug!(receipt = %candidate, "allocated receipt number");
                return Ok(candidate);
            }
        }
        Err(ApiError::InternalError(format!(
            "no free {} receipt number found",
            kind.prefix()
        )))
    }

    /// The number `allocate` would return next, without consuming it.
    pub async fn preview(&self, kind: ReceiptKind) -> ApiResult<String> {
        let mut value = self.counters.peek_next_value(kind).await?;
        for _ in 0..MAX_SKIPS {
            let candidate = kind.format(value);
            if !self.is_taken(&candidate).await? {
                return Ok(candidate);
            }
            value += 1;
        }
        Err(ApiError::InternalError(format!(
            "no free {} receipt number found",
            kind.prefix()
        )))
    }

    pub async fn is_taken(&self, receipt_number: &str) -> ApiResult<bool> {
        Ok(self
            .transactions
            .find_by_receipt_number(receipt_number)
            .await?
            .is_some())
    }
}
