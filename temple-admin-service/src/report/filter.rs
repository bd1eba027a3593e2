use chrono::NaiveDate;
use temple_admin_api::domain::validation::parse_month;
use temple_admin_api::{ApiError, ApiResult, ReportFilter};
use temple_admin_db::models::ledger::TransactionModel;

/// Inclusive date bounds a filter resolves to; a month overrides from/to.
pub fn date_bounds(filter: &ReportFilter) -> ApiResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    match filter.month.as_deref() {
        Some(month) => {
            let first = parse_month(month)
                .ok_or_else(|| ApiError::field("month", "must be formatted as YYYY-MM"))?;
            let last = crate::support::add_months(first, 1)?
                .pred_opt()
                .ok_or_else(|| ApiError::field("month", "month is out of range"))?;
            Ok((Some(first), Some(last)))
        }
        None => Ok((filter.from, filter.to)),
    }
}

/// Live transactions matching every set criterion, in input order. Text
/// criteria compare case-insensitively.
pub fn apply_filter(
    transactions: &[TransactionModel],
    filter: &ReportFilter,
) -> ApiResult<Vec<TransactionModel>> {
    let (from, to) = date_bounds(filter)?;
    let category = filter.category.as_deref().map(str::trim);
    let sub_category = filter.sub_category.as_deref().map(str::trim);

    Ok(transactions
        .iter()
        .filter(|tx| !tx.is_deleted)
        .filter(|tx| filter.transaction_type.map_or(true, |t| tx.transaction_type == t))
        .filter(|tx| category.map_or(true, |c| tx.category.trim().eq_ignore_ascii_case(c)))
        .filter(|tx| {
            sub_category.map_or(true, |s| {
                tx.sub_category
                    .as_deref()
                    .is_some_and(|own| own.trim().eq_ignore_ascii_case(s))
            })
        })
        .filter(|tx| from.map_or(true, |f| tx.date >= f))
        .filter(|tx| to.map_or(true, |t| tx.date <= t))
        .cloned()
        .collect())
}

/// One-line description of the applied criteria, e.g. for a report header.
pub fn describe(filter: &ReportFilter) -> Vec<(&'static str, String)> {
    let mut parts = Vec::new();
    if let Some(t) = filter.transaction_type {
        parts.push(("type", t.to_string()));
    }
    if let Some(c) = &filter.category {
        parts.push(("category", c.clone()));
    }
    if let Some(s) = &filter.sub_category {
        parts.push(("sub_category", s.clone()));
    }
    match &filter.month {
        Some(m) => parts.push(("month", m.clone())),
        None => {
            if let Some(f) = filter.from {
                parts.push(("from", f.to_string()));
            }
            if let Some(t) = filter.to {
                parts.push(("to", t.to_string()));
            }
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use temple_admin_api::TransactionType;

    fn tx(y: i32, m: u32, d: u32, t: TransactionType, category: &str) -> TransactionModel {
        TransactionModel::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            t,
            category,
            "",
            Decimal::new(100, 0),
        )
    }

    #[test]
    fn test_month_overrides_range() {
        let rows = vec![
            tx(2026, 1, 31, TransactionType::Donation, "Annadan"),
            tx(2026, 2, 1, TransactionType::Donation, "Annadan"),
            tx(2026, 2, 28, TransactionType::Expense, "Pooja"),
            tx(2026, 3, 1, TransactionType::Donation, "Annadan"),
        ];
        let filter = ReportFilter {
            month: Some("2026-02".to_string()),
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        };
        let found = apply_filter(&rows, &filter).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(describe(&filter), vec![("month", "2026-02".to_string())]);
    }

    #[test]
    fn test_text_criteria_ignore_case_and_deleted_rows() {
        let mut deleted = tx(2026, 1, 5, TransactionType::Donation, "annadan");
        deleted.is_deleted = true;
        let mut with_sub = tx(2026, 1, 6, TransactionType::Donation, "ANNADAN");
        with_sub.sub_category = Some("Khichdi".to_string());
        let rows = vec![deleted, with_sub, tx(2026, 1, 7, TransactionType::Donation, "Other")];

        let by_category = ReportFilter {
            category: Some("Annadan".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filter(&rows, &by_category).unwrap().len(), 1);

        let by_sub = ReportFilter {
            sub_category: Some("khichdi".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filter(&rows, &by_sub).unwrap().len(), 1);

        let range = ReportFilter {
            from: NaiveDate::from_ymd_opt(2026, 1, 7),
            to: NaiveDate::from_ymd_opt(2026, 1, 7),
            transaction_type: Some(TransactionType::Donation),
            ..Default::default()
        };
        assert_eq!(apply_filter(&rows, &range).unwrap().len(), 1);
    }
}
