use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use temple_admin_api::ShopStatus;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::models::rent::{AgreementModel, LoanModel, RentPenaltyModel, ShopModel, TenantModel};

use super::aggregate::{summarize, Summary};

/// Headline figures for the landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub shops_total: usize,
    pub shops_vacant: usize,
    pub shops_occupied: usize,
    pub shops_maintenance: usize,
    pub active_tenants: usize,
    pub active_agreements: usize,
    pub active_loans: usize,
    pub loans_outstanding: Decimal,
    pub pending_penalties: usize,
    pub pending_penalty_amount: Decimal,
    pub summary: Summary,
}

impl Dashboard {
    pub fn compute(
        shops: &[ShopModel],
        tenants: &[TenantModel],
        agreements: &[AgreementModel],
        loans: &[LoanModel],
        penalties: &[RentPenaltyModel],
        transactions: &[TransactionModel],
    ) -> Self {
        let count_shops = |status: ShopStatus| shops.iter().filter(|s| s.status == status).count();
        let active_loans: Vec<&LoanModel> = loans.iter().filter(|l| l.is_active()).collect();
        let pending: Vec<&RentPenaltyModel> = penalties.iter().filter(|p| p.is_pending()).collect();
        let live: Vec<TransactionModel> = transactions
            .iter()
            .filter(|tx| !tx.is_deleted)
            .cloned()
            .collect();

        Self {
            shops_total: shops.len(),
            shops_vacant: count_shops(ShopStatus::Vacant),
            shops_occupied: count_shops(ShopStatus::Occupied),
            shops_maintenance: count_shops(ShopStatus::Maintenance),
            active_tenants: tenants.iter().filter(|t| t.is_active()).count(),
            active_agreements: agreements.iter().filter(|a| a.is_active()).count(),
            active_loans: active_loans.len(),
            loans_outstanding: active_loans.iter().map(|l| l.outstanding_balance).sum(),
            pending_penalties: pending.len(),
            pending_penalty_amount: pending.iter().map(|p| p.penalty_amount).sum(),
            summary: summarize(&live),
        }
    }
}
