use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use temple_admin_api::TransactionType;
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - A single financial movement: donation, expense, utilities, salary or rent income.
/// - Donor fields are populated for donations, payee fields for outgoing payments and
///   rent linkage for rent income.
/// - Donations and expenses are soft deleted via `is_deleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionModel {
    pub id: Uuid,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub category: String,
    pub sub_category: Option<String>,
    pub description: String,
    pub amount: Decimal,

    /// Unique per receipt kind, e.g. `DON-000012`, `RENT-000004-EMI`
    pub receipt_number: Option<HeaplessString<30>>,
    pub payment_mode: Option<String>,

    pub donor_name: Option<String>,
    pub donor_contact: Option<String>,
    pub donor_address: Option<String>,
    pub family_members: Option<i32>,
    pub amount_per_person: Option<Decimal>,

    pub payee_name: Option<String>,
    pub payee_contact: Option<String>,

    /// References TenantModel.id
    pub tenant_id: Option<Uuid>,
    /// References ShopModel.id
    pub shop_id: Option<Uuid>,
    /// References AgreementModel.id
    pub agreement_id: Option<Uuid>,
    /// References LoanModel.id
    pub loan_id: Option<Uuid>,
    /// References RentPenaltyModel.id
    pub penalty_id: Option<Uuid>,

    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    /// References UserModel.id
    pub created_by: Option<Uuid>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(TransactionModel);

impl TransactionModel {
    /// A bare record of the given type; callers fill in the type-specific fields.
    pub fn new(
        date: NaiveDate,
        transaction_type: TransactionType,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            transaction_type,
            category: category.into(),
            sub_category: None,
            description: description.into(),
            amount,
            receipt_number: None,
            payment_mode: None,
            donor_name: None,
            donor_contact: None,
            donor_address: None,
            family_members: None,
            amount_per_person: None,
            payee_name: None,
            payee_contact: None,
            tenant_id: None,
            shop_id: None,
            agreement_id: None,
            loan_id: None,
            penalty_id: None,
            is_deleted: false,
            created_at: Utc::now(),
            created_by: None,
            audit_log_id: None,
        }
    }

    pub fn receipt_str(&self) -> Option<&str> {
        self.receipt_number.as_ref().map(|r| r.as_str())
    }

    /// The donor for income records, the payee otherwise.
    pub fn party_name(&self) -> Option<&str> {
        self.donor_name
            .as_deref()
            .or(self.payee_name.as_deref())
    }
}
