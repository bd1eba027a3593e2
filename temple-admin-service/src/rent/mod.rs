//! Shops, tenants and the agreement/loan/penalty lifecycle that ties them
//! together, plus composite rent collection.

mod agreements;
mod collection;
mod loans;
mod penalties;
mod shops;
mod tenants;

pub use collection::RentCollection;

use rust_decimal::Decimal;
use sqlx::Database;
use temple_admin_api::{ApiError, ApiResult, TransactionType};
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::models::rent::AgreementModel;
use temple_admin_db::utils::to_heapless;
use uuid::Uuid;

use crate::ledger::ReceiptAllocator;
use crate::repositories::Repositories;

pub const RENT_CATEGORY: &str = "Rent";
pub const EMI_CATEGORY: &str = "Loan EMI";
pub const PENALTY_CATEGORY: &str = "Penalty";
pub const UPFRONT_CATEGORY: &str = "Deposit & Advance";

pub struct RentService<DB: Database> {
    repos: Repositories<DB>,
    receipts: ReceiptAllocator<DB>,
}

impl<DB: Database> RentService<DB> {
    pub fn new(repos: Repositories<DB>) -> Self {
        let receipts = ReceiptAllocator::new(repos.receipt_counters.clone(), repos.transactions.clone());
        Self { repos, receipts }
    }
}

/// A RentIncome record linked to the agreement's shop and tenant.
pub(crate) struct RentIncome<'a> {
    pub agreement: &'a AgreementModel,
    pub date: chrono::NaiveDate,
    pub category: &'static str,
    pub description: String,
    pub amount: Decimal,
    pub receipt_number: &'a str,
    pub payment_mode: Option<String>,
    pub tenant_name: Option<String>,
    pub actor: Option<Uuid>,
}

impl RentIncome<'_> {
    pub fn into_model(self) -> ApiResult<TransactionModel> {
        let mut tx = TransactionModel::new(
            self.date,
            TransactionType::RentIncome,
            self.category,
            self.description,
            self.amount,
        );
        tx.receipt_number = Some(
            to_heapless(self.receipt_number).map_err(|e| ApiError::field("receipt_number", e))?,
        );
        tx.payment_mode = self.payment_mode;
        tx.donor_name = self.tenant_name;
        tx.tenant_id = Some(self.agreement.tenant_id);
        tx.shop_id = Some(self.agreement.shop_id);
        tx.agreement_id = Some(self.agreement.id);
        tx.created_by = self.actor;
        Ok(tx)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::Postgres;
    use temple_admin_api::{
        AgreementType, CreateAgreementRequest, CreateShopRequest, CreateTenantRequest,
    };
    use temple_admin_db::models::rent::{ShopModel, TenantModel};

    pub fn service() -> RentService<Postgres> {
        RentService::new(Repositories::in_memory())
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    pub async fn shop(rent: &RentService<Postgres>, number: &str, monthly_rent: i64) -> ShopModel {
        rent.create_shop(
            CreateShopRequest {
                shop_number: number.to_string(),
                size: "10x12".to_string(),
                monthly_rent: dec(monthly_rent),
                deposit: dec(monthly_rent * 3),
                description: None,
            },
            None,
        )
        .await
        .unwrap()
    }

    pub async fn tenant(rent: &RentService<Postgres>, name: &str) -> TenantModel {
        rent.create_tenant(
            CreateTenantRequest {
                name: name.to_string(),
                phone: "9876543210".to_string(),
                email: None,
                address: "Main Road".to_string(),
                business_type: "Flowers".to_string(),
            },
            None,
        )
        .await
        .unwrap()
    }

    pub fn agreement_request(shop: &ShopModel, tenant: &TenantModel) -> CreateAgreementRequest {
        CreateAgreementRequest {
            shop_id: shop.id,
            tenant_id: tenant.id,
            agreement_date: date(2026, 1, 31),
            duration_months: 11,
            monthly_rent: None,
            security_deposit: Decimal::ZERO,
            advance_rent: Decimal::ZERO,
            agreement_type: AgreementType::Commercial,
        }
    }

    /// Shop, tenant and an Active agreement without upfront payment.
    pub async fn leased(rent: &RentService<Postgres>, number: &str) -> AgreementModel {
        let shop = shop(rent, number, 5000).await;
        let tenant = tenant(rent, &format!("Tenant {number}")).await;
        rent.create_agreement(agreement_request(&shop, &tenant), None)
            .await
            .unwrap()
    }
}
