use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::TransactionType;
use super::validation::{validate_non_negative, validate_positive};

/// Category name of family-based donations (members × per-person contribution).
pub const VARGANI_CATEGORY: &str = "Vargani";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDonationRequest {
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 50, message = "category is required"))]
    pub category: String,
    #[validate(length(max = 50))]
    pub sub_category: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    /// Derived from `family_members × amount_per_person` for Vargani when omitted.
    #[validate(custom(function = "validate_positive"))]
    pub amount: Option<Decimal>,
    #[validate(length(min = 1, max = 100, message = "donor name is required"))]
    pub donor_name: String,
    #[validate(length(max = 50))]
    pub donor_contact: Option<String>,
    #[validate(length(max = 200))]
    pub donor_address: Option<String>,
    #[validate(range(min = 1, max = 1000, message = "family members must be at least 1"))]
    pub family_members: Option<i32>,
    #[validate(custom(function = "validate_positive"))]
    pub amount_per_person: Option<Decimal>,
    #[validate(length(max = 30))]
    pub payment_mode: Option<String>,
    /// Receipt number previewed by the client; rejected with a conflict when already used.
    #[validate(length(max = 30))]
    pub receipt_number: Option<String>,
}

impl CreateDonationRequest {
    pub fn is_vargani(&self) -> bool {
        self.category.trim().eq_ignore_ascii_case(VARGANI_CATEGORY)
    }
}

fn default_expense_type() -> TransactionType {
    TransactionType::Expense
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    pub date: NaiveDate,
    #[serde(default = "default_expense_type")]
    pub transaction_type: TransactionType,
    #[validate(length(min = 1, max = 50, message = "category is required"))]
    pub category: String,
    #[validate(length(max = 50))]
    pub sub_category: Option<String>,
    #[validate(length(min = 1, max = 500, message = "description is required"))]
    pub description: String,
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 100, message = "payee name is required"))]
    pub payee_name: String,
    #[validate(length(max = 50))]
    pub payee_contact: Option<String>,
    #[validate(length(max = 30))]
    pub payment_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 50, message = "category must not be empty"))]
    pub category: Option<String>,
    #[validate(length(max = 50))]
    pub sub_category: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive"))]
    pub amount: Option<Decimal>,
    #[validate(length(max = 30))]
    pub payment_mode: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub donor_name: Option<String>,
    #[validate(length(max = 50))]
    pub donor_contact: Option<String>,
    #[validate(length(max = 200))]
    pub donor_address: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub family_members: Option<i32>,
    #[validate(custom(function = "validate_non_negative"))]
    pub amount_per_person: Option<Decimal>,
    #[validate(length(min = 1, max = 100))]
    pub payee_name: Option<String>,
    #[validate(length(max = 50))]
    pub payee_contact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_type_defaults_to_expense() {
        let request: CreateExpenseRequest = serde_json::from_str(
            r#"{"date":"2026-01-05","category":"Pooja","description":"Flowers","amount":"250","payee_name":"Vendor"}"#,
        )
        .unwrap();
        assert_eq!(request.transaction_type, TransactionType::Expense);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_vargani_is_case_insensitive() {
        let request: CreateDonationRequest = serde_json::from_str(
            r#"{"date":"2026-01-05","category":" vargani ","donor_name":"R. Patil","family_members":4,"amount_per_person":"101"}"#,
        )
        .unwrap();
        assert!(request.is_vargani());
        assert!(request.amount.is_none());
    }
}
