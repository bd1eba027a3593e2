use moka::future::Cache;
use std::time::Duration;
use temple_admin_api::{ApiError, ApiResult, ConflictKind};
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::utils::hash_as_i64;

/// Remembers submission fingerprints for a fixed window so that a resubmitted
/// form is rejected instead of recorded twice.
#[derive(Clone)]
pub struct DuplicateGuard {
    seen: Option<Cache<i64, ()>>,
}

impl DuplicateGuard {
    /// A zero window disables detection.
    pub fn new(window: Duration) -> Self {
        let seen = (!window.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(10_000)
                .time_to_live(window)
                .build()
        });
        Self { seen }
    }

    /// Stable over type, date, category, amount, party and description.
    pub fn fingerprint(tx: &TransactionModel) -> ApiResult<i64> {
        let key = (
            tx.transaction_type.as_str(),
            tx.date.to_string(),
            tx.category.trim().to_lowercase(),
            tx.amount.normalize().to_string(),
            tx.party_name().unwrap_or_default().trim().to_lowercase(),
            tx.description.trim().to_string(),
        );
        hash_as_i64(&key).map_err(ApiError::InternalError)
    }

    pub fn check(&self, fingerprint: i64) -> ApiResult<()> {
        match &self.seen {
            Some(seen) if seen.contains_key(&fingerprint) => {
                Err(ApiError::Conflict(ConflictKind::DuplicateSubmission))
            }
            _ => Ok(()),
        }
    }

    pub async fn remember(&self, fingerprint: i64) {
        if let Some(seen) = &self.seen {
            seen.insert(fingerprint, ()).await;
        }
    }
}
