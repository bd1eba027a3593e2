use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use temple_admin_api::PenaltyStatus;
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - Late-payment penalty charged against an agreement.
/// - `penalty_amount = rent_amount × penalty_rate / 100`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPenaltyModel {
    pub id: Uuid,

    /// References AgreementModel.id
    pub agreement_id: Uuid,

    pub due_date: NaiveDate,
    pub rent_amount: Decimal,
    pub penalty_rate: Decimal,
    pub penalty_amount: Decimal,
    pub status: PenaltyStatus,
    pub paid_date: Option<NaiveDate>,
    pub reason: Option<String>,

    pub created_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(RentPenaltyModel);

impl RentPenaltyModel {
    pub fn is_pending(&self) -> bool {
        self.status == PenaltyStatus::Pending
    }
}
