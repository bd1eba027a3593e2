use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::Database;
use temple_admin_api::{
    AgreementStatus, ApiError, ApiResult, CreateAgreementRequest, ReceiptKind,
    UpdateAgreementRequest,
};
use temple_admin_db::models::rent::{AgreementModel, ShopModel};
use temple_admin_db::repository::{AgreementRepository, CreateBatch, LoadAll, UpdateBatch};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{RentIncome, RentService, UPFRONT_CATEGORY};
use crate::support::add_months;

impl<DB: Database> RentService<DB> {
    /// Signs an agreement: occupies the shop and records the deposit plus
    /// advance rent as one RentIncome receipt.
    pub async fn create_agreement(
        &self,
        request: CreateAgreementRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<AgreementModel> {
        request.validate()?;
        let mut shop = self.repos.shop(request.shop_id).await?;
        let tenant = self.repos.tenant(request.tenant_id).await?;

        if !tenant.is_active() {
            return Err(ApiError::InvalidState(format!(
                "tenant {} is inactive",
                tenant.name
            )));
        }
        self.ensure_shop_available(&shop, None).await?;

        let agreement = AgreementModel {
            id: Uuid::new_v4(),
            shop_id: shop.id,
            tenant_id: tenant.id,
            agreement_date: request.agreement_date,
            duration_months: request.duration_months,
            monthly_rent: request.monthly_rent.unwrap_or(shop.monthly_rent),
            security_deposit: request.security_deposit,
            advance_rent: request.advance_rent,
            agreement_type: request.agreement_type,
            status: AgreementStatus::Active,
            next_due_date: add_months(request.agreement_date, 1)?,
            last_payment_date: None,
            active_loan_id: None,
            pending_penalty_ids: Vec::new(),
            created_at: Utc::now(),
            audit_log_id: None,
        };

        let audit_log_id = self.repos.audit(actor, "agreement.create").await?;
        let mut saved = self
            .repos
            .agreements
            .create_batch(vec![agreement], Some(audit_log_id))
            .await?;
        let agreement = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("agreement was not stored".to_string()))?;

        shop.occupy(tenant.id, agreement.id);
        self.repos.shops.update_batch(vec![shop.clone()], Some(audit_log_id)).await?;

        let upfront = agreement.upfront_amount();
        if upfront > Decimal::ZERO {
            let receipt = self.receipts.allocate(ReceiptKind::RentIncome).await?;
            let tx = RentIncome {
                agreement: &agreement,
                date: agreement.agreement_date,
                category: UPFRONT_CATEGORY,
                description: format!("Security deposit and advance rent for shop {}", shop.shop_number),
                amount: upfront,
                receipt_number: &receipt,
                payment_mode: None,
                tenant_name: Some(tenant.name.clone()),
                actor,
            }
            .into_model()?;
            self.repos.transactions.create_batch(vec![tx], Some(audit_log_id)).await?;
            info!(receipt = %receipt, amount = %upfront, "upfront rent recorded");
        }

        info!(
            agreement_id = %agreement.id,
            shop_number = %shop.shop_number,
            tenant = %tenant.name,
            "agreement created"
        );
        Ok(agreement)
    }

    /// Newest first.
    pub async fn list_agreements(&self) -> ApiResult<Vec<AgreementModel>> {
        let mut agreements = self.repos.agreements.load_all().await?;
        agreements.sort_by(|a, b| {
            b.agreement_date
                .cmp(&a.agreement_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(agreements)
    }

    pub async fn get_agreement(&self, id: Uuid) -> ApiResult<AgreementModel> {
        self.repos.agreement(id).await
    }

    /// Closing an agreement (Terminated or Expired) vacates the shop;
    /// reactivating it re-occupies the shop when it is still free. Loans and
    /// penalties are left as they are.
    pub async fn update_agreement(
        &self,
        id: Uuid,
        request: UpdateAgreementRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<AgreementModel> {
        request.validate()?;
        let mut agreement = self.repos.agreement(id).await?;

        if let Some(duration) = request.duration_months {
            agreement.duration_months = duration;
        }
        if let Some(rent) = request.monthly_rent {
            agreement.monthly_rent = rent;
        }
        if let Some(agreement_type) = request.agreement_type {
            agreement.agreement_type = agreement_type;
        }

        let mut shop_change = None;
        if let Some(status) = request.status.filter(|s| *s != agreement.status) {
            let mut shop = self.repos.shop(agreement.shop_id).await?;
            if status.is_closed() {
                if agreement.is_active() && shop.agreement_id == Some(agreement.id) {
                    shop.vacate();
                    shop_change = Some(shop);
                }
            } else {
                self.ensure_shop_available(&shop, Some(agreement.id)).await?;
                shop.occupy(agreement.tenant_id, agreement.id);
                shop_change = Some(shop);
            }
            info!(agreement_id = %id, from = ?agreement.status, to = ?status, "agreement status changed");
            agreement.status = status;
        }

        let audit_log_id = self.repos.audit(actor, "agreement.update").await?;
        let mut updated = self
            .repos
            .agreements
            .update_batch(vec![agreement], Some(audit_log_id))
            .await?;
        if let Some(shop) = shop_change {
            self.repos.shops.update_batch(vec![shop], Some(audit_log_id)).await?;
        }
        updated.pop().ok_or_else(|| ApiError::not_found("Agreement", id))
    }

    /// The shop must be Vacant and carry no other Active agreement.
    async fn ensure_shop_available(&self, shop: &ShopModel, except: Option<Uuid>) -> ApiResult<()> {
        if !shop.is_vacant() {
            return Err(ApiError::InvalidState(format!(
                "shop {} is not vacant ({:?})",
                shop.shop_number, shop.status
            )));
        }
        let occupied = self
            .repos
            .agreements
            .find_by_shop_id(shop.id)
            .await?
            .into_iter()
            .any(|a| a.is_active() && Some(a.id) != except);
        if occupied {
            return Err(ApiError::InvalidState(format!(
                "shop {} already has an active agreement",
                shop.shop_number
            )));
        }
        Ok(())
    }
}
