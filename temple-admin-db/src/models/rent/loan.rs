use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use temple_admin_api::LoanStatus;
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - Amortized loan extended to a tenant against an agreement.
/// - `interest_rate` is monthly, in percent.
///
/// # Invariant
/// - `outstanding_balance >= 0`; reaching zero moves `status` to Completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanModel {
    pub id: Uuid,

    /// References TenantModel.id
    pub tenant_id: Uuid,
    /// References AgreementModel.id
    pub agreement_id: Uuid,

    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub duration_months: i32,
    pub emi_amount: Decimal,
    pub outstanding_balance: Decimal,
    pub total_repaid: Decimal,
    pub status: LoanStatus,

    pub loan_date: NaiveDate,
    pub next_emi_date: NaiveDate,
    pub last_payment_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(LoanModel);

impl LoanModel {
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}
