use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::TransactionType;
use super::validation::validate_month;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Transactions,
    Summary,
    Category,
    Monthly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
    Html,
    Pdf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    #[default]
    En,
    Mr,
}

/// Criteria applied to the transaction set before aggregation.
///
/// When `month` is set it takes precedence over `from`/`to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReportFilter {
    pub transaction_type: Option<TransactionType>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 50))]
    pub sub_category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[validate(custom(function = "validate_month"))]
    pub month: Option<String>,
}

impl ReportFilter {
    pub fn is_empty(&self) -> bool {
        self == &ReportFilter::default()
    }
}

/// Flat query-string form of a report request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReportQuery {
    #[serde(default)]
    pub kind: ReportKind,
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default)]
    pub lang: ReportLanguage,
    pub transaction_type: Option<TransactionType>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 50))]
    pub sub_category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[validate(custom(function = "validate_month"))]
    pub month: Option<String>,
}

impl ReportQuery {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            transaction_type: self.transaction_type,
            category: self.category.clone().filter(|s| !s.trim().is_empty()),
            sub_category: self.sub_category.clone().filter(|s| !s.trim().is_empty()),
            from: self.from,
            to: self.to,
            month: self.month.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_and_blank_filters() {
        let query: ReportQuery =
            serde_json::from_str(r#"{"category":" ","month":"2026-02"}"#).unwrap();
        assert_eq!(query.kind, ReportKind::Transactions);
        assert_eq!(query.format, ReportFormat::Json);
        let filter = query.filter();
        assert_eq!(filter.category, None);
        assert_eq!(filter.month.as_deref(), Some("2026-02"));
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_bad_month_is_rejected() {
        let filter = ReportFilter {
            month: Some("Feb 2026".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
        assert!(ReportFilter::default().is_empty());
    }
}
