use chrono::{Months, NaiveDate, Utc};
use sqlx::Database;
use temple_admin_api::{ApiError, ApiResult};
use temple_admin_db::models::audit::AuditLogModel;
use temple_admin_db::models::Identifiable;
use temple_admin_db::repository::{AuditLogRepository, LoadBatch};
use uuid::Uuid;

/// Loads a single record, mapping absence to `ApiError::NotFound`.
pub(crate) async fn require<DB, T, R>(repo: &R, entity: &str, id: Uuid) -> ApiResult<T>
where
    DB: Database,
    T: Identifiable,
    R: LoadBatch<DB, T> + ?Sized,
{
    repo.load_batch(&[id])
        .await?
        .pop()
        .flatten()
        .ok_or_else(|| ApiError::not_found(entity, id))
}

/// Writes the audit log entry shared by every record an operation touches.
pub(crate) async fn audit<DB, R>(repo: &R, actor: Option<Uuid>, action: &str) -> ApiResult<Uuid>
where
    DB: Database,
    R: AuditLogRepository<DB> + ?Sized,
{
    let entry = AuditLogModel::new(actor, action);
    repo.create(&entry).await?;
    Ok(entry.id)
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `date` plus `months` calendar months, clamped to the end of the target month.
pub fn add_months(date: NaiveDate, months: u32) -> ApiResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ApiError::field("date", "date is out of range"))
}

/// Trims and drops blank optional text.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2026, 1, 15), 1).unwrap(), date(2026, 2, 15));
        assert_eq!(add_months(date(2026, 1, 31), 1).unwrap(), date(2026, 2, 28));
        assert_eq!(add_months(date(2028, 1, 31), 1).unwrap(), date(2028, 2, 29));
        assert_eq!(add_months(date(2026, 12, 10), 1).unwrap(), date(2027, 1, 10));
    }

    #[test]
    fn test_clean_drops_blank_values() {
        assert_eq!(clean(Some("  UPI ".to_string())), Some("UPI".to_string()));
        assert_eq!(clean(Some("   ".to_string())), None);
        assert_eq!(clean(None), None);
    }
}
