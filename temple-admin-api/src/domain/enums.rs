use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "shop_status", rename_all = "PascalCase"))]
pub enum ShopStatus {
    Vacant,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "tenant_status", rename_all = "PascalCase"))]
pub enum TenantStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "agreement_type", rename_all = "PascalCase"))]
pub enum AgreementType {
    Residential,
    Commercial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "agreement_status", rename_all = "PascalCase"))]
pub enum AgreementStatus {
    Active,
    Expired,
    Terminated,
}

impl AgreementStatus {
    /// Terminated and Expired agreements release their shop.
    pub fn is_closed(&self) -> bool {
        matches!(self, AgreementStatus::Expired | AgreementStatus::Terminated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "loan_status", rename_all = "PascalCase"))]
pub enum LoanStatus {
    Active,
    Completed,
    Defaulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "penalty_status", rename_all = "PascalCase"))]
pub enum PenaltyStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "transaction_type", rename_all = "PascalCase"))]
pub enum TransactionType {
    Donation,
    Expense,
    Utilities,
    Salary,
    RentIncome,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Donation,
        TransactionType::Expense,
        TransactionType::Utilities,
        TransactionType::Salary,
        TransactionType::RentIncome,
    ];

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionType::Donation | TransactionType::RentIncome)
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Donation => "Donation",
            TransactionType::Expense => "Expense",
            TransactionType::Utilities => "Utilities",
            TransactionType::Salary => "Salary",
            TransactionType::RentIncome => "RentIncome",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ();

    /// Case-insensitive; accepts `RentIncome`, `rent_income` and `rent income`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "donation" => Ok(TransactionType::Donation),
            "expense" => Ok(TransactionType::Expense),
            "utilities" => Ok(TransactionType::Utilities),
            "salary" => Ok(TransactionType::Salary),
            "rentincome" => Ok(TransactionType::RentIncome),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "user_role", rename_all = "PascalCase"))]
pub enum UserRole {
    Viewer,
    Treasurer,
    Admin,
}

impl UserRole {
    pub fn can_write(&self) -> bool {
        matches!(self, UserRole::Treasurer | UserRole::Admin)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "user_status", rename_all = "PascalCase"))]
pub enum UserStatus {
    Active,
    Inactive,
}

/// Receipt numbering scope. Each kind owns an independent counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "receipt_kind", rename_all = "PascalCase"))]
pub enum ReceiptKind {
    Donation,
    RentIncome,
}

impl ReceiptKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ReceiptKind::Donation => "DON",
            ReceiptKind::RentIncome => "RENT",
        }
    }

    /// Renders a counter value as a printable receipt number, e.g. `DON-000042`.
    pub fn format(&self, value: i64) -> String {
        format!("{}-{:06}", self.prefix(), value)
    }
}

impl FromStr for ReceiptKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "donation" | "donations" => Ok(ReceiptKind::Donation),
            "rent" | "rent_income" | "rentincome" | "rent-income" => Ok(ReceiptKind::RentIncome),
            _ => Err(()),
        }
    }
}
