use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use temple_admin_api::{AgreementStatus, AgreementType};
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - Lease contract binding one shop to one tenant.
/// - At most one Active agreement exists per shop.
/// - `next_due_date` is always the agreement date or last payment date plus one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementModel {
    pub id: Uuid,

    /// References ShopModel.id
    pub shop_id: Uuid,
    /// References TenantModel.id
    pub tenant_id: Uuid,

    pub agreement_date: NaiveDate,
    pub duration_months: i32,
    pub monthly_rent: Decimal,
    pub security_deposit: Decimal,
    pub advance_rent: Decimal,
    pub agreement_type: AgreementType,
    pub status: AgreementStatus,

    pub next_due_date: NaiveDate,
    pub last_payment_date: Option<NaiveDate>,

    /// References LoanModel.id of the loan currently being repaid
    pub active_loan_id: Option<Uuid>,
    /// References RentPenaltyModel.id of every unpaid penalty
    pub pending_penalty_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(AgreementModel);

impl AgreementModel {
    pub fn is_active(&self) -> bool {
        self.status == AgreementStatus::Active
    }

    /// Deposit plus advance rent collected when the agreement is signed.
    pub fn upfront_amount(&self) -> Decimal {
        self.security_deposit + self.advance_rent
    }

    pub fn add_pending_penalty(&mut self, penalty_id: Uuid) {
        if !self.pending_penalty_ids.contains(&penalty_id) {
            self.pending_penalty_ids.push(penalty_id);
        }
    }

    pub fn remove_pending_penalty(&mut self, penalty_id: Uuid) {
        self.pending_penalty_ids.retain(|id| *id != penalty_id);
    }
}
