use chrono::Utc;
use sqlx::Database;
use temple_admin_api::{ApiError, ApiResult, CreateShopRequest, ShopStatus, UpdateShopRequest};
use temple_admin_db::models::rent::ShopModel;
use temple_admin_db::repository::{
    AgreementRepository, CreateBatch, DeleteBatch, LoadAll, ShopRepository, UpdateBatch,
};
use temple_admin_db::utils::to_heapless;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::RentService;
use crate::support::clean;

impl<DB: Database> RentService<DB> {
    pub async fn create_shop(&self, request: CreateShopRequest, actor: Option<Uuid>) -> ApiResult<ShopModel> {
        request.validate()?;
        let shop_number = request.shop_number.trim();
        self.ensure_shop_number_free(shop_number, None).await?;

        let shop = ShopModel {
            id: Uuid::new_v4(),
            shop_number: to_heapless(shop_number).map_err(|e| ApiError::field("shop_number", e))?,
            size: request.size.trim().to_string(),
            monthly_rent: request.monthly_rent,
            deposit: request.deposit,
            status: ShopStatus::Vacant,
            description: clean(request.description),
            tenant_id: None,
            agreement_id: None,
            created_at: Utc::now(),
            audit_log_id: None,
        };

        let audit_log_id = self.repos.audit(actor, "shop.create").await?;
        let mut saved = self.repos.shops.create_batch(vec![shop], Some(audit_log_id)).await?;
        let shop = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("shop was not stored".to_string()))?;
        info!(shop_number = %shop.shop_number, "shop created");
        Ok(shop)
    }

    /// All shops ordered by shop number.
    pub async fn list_shops(&self) -> ApiResult<Vec<ShopModel>> {
        let mut shops = self.repos.shops.load_all().await?;
        shops.sort_by(|a, b| a.shop_number.as_str().cmp(b.shop_number.as_str()));
        Ok(shops)
    }

    pub async fn get_shop(&self, id: Uuid) -> ApiResult<ShopModel> {
        self.repos.shop(id).await
    }

    /// Occupancy is owned by agreements: `Occupied` cannot be set by hand and
    /// an occupied shop cannot be moved to another status.
    pub async fn update_shop(
        &self,
        id: Uuid,
        request: UpdateShopRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<ShopModel> {
        request.validate()?;
        let mut shop = self.repos.shop(id).await?;

        if let Some(number) = request.shop_number.as_deref().map(str::trim) {
            if !number.eq_ignore_ascii_case(shop.shop_number.as_str()) {
                self.ensure_shop_number_free(number, Some(id)).await?;
            }
            shop.shop_number = to_heapless(number).map_err(|e| ApiError::field("shop_number", e))?;
        }
        if let Some(size) = request.size {
            shop.size = size.trim().to_string();
        }
        if let Some(rent) = request.monthly_rent {
            shop.monthly_rent = rent;
        }
        if let Some(deposit) = request.deposit {
            shop.deposit = deposit;
        }
        if request.description.is_some() {
            shop.description = clean(request.description);
        }
        if let Some(status) = request.status.filter(|s| *s != shop.status) {
            if status == ShopStatus::Occupied {
                return Err(ApiError::InvalidState(
                    "a shop becomes occupied only through an agreement".to_string(),
                ));
            }
            if shop.status == ShopStatus::Occupied {
                return Err(ApiError::InvalidState(format!(
                    "shop {} is occupied; terminate its agreement first",
                    shop.shop_number
                )));
            }
            shop.status = status;
        }

        let audit_log_id = self.repos.audit(actor, "shop.update").await?;
        let mut updated = self.repos.shops.update_batch(vec![shop], Some(audit_log_id)).await?;
        updated.pop().ok_or_else(|| ApiError::not_found("Shop", id))
    }

    /// Hard delete; refused while any agreement references the shop.
    pub async fn delete_shop(&self, id: Uuid, actor: Option<Uuid>) -> ApiResult<()> {
        let shop = self.repos.shop(id).await?;
        let agreements = self.repos.agreements.find_by_shop_id(id).await?;
        if agreements.iter().any(|a| a.is_active()) {
            return Err(ApiError::InvalidState(format!(
                "shop {} has an active agreement",
                shop.shop_number
            )));
        }
        if !agreements.is_empty() {
            return Err(ApiError::InvalidState(format!(
                "shop {} has agreement history and cannot be deleted",
                shop.shop_number
            )));
        }

        let audit_log_id = self.repos.audit(actor, "shop.delete").await?;
        self.repos.shops.delete_batch(&[id], Some(audit_log_id)).await?;
        info!(shop_number = %shop.shop_number, "shop deleted");
        Ok(())
    }

    async fn ensure_shop_number_free(&self, shop_number: &str, except: Option<Uuid>) -> ApiResult<()> {
        match self.repos.shops.find_by_shop_number(shop_number).await? {
            Some(existing) if Some(existing.id) != except => Err(ApiError::field(
                "shop_number",
                format!("shop number {shop_number} already exists"),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use temple_admin_api::{AgreementStatus, ApiError, ShopStatus, UpdateAgreementRequest, UpdateShopRequest};

    #[tokio::test]
    async fn test_shop_number_must_be_unique() {
        let rent = service();
        shop(&rent, "A-010", 6000).await;
        let request = temple_admin_api::CreateShopRequest {
            shop_number: "a-010".to_string(),
            size: String::new(),
            monthly_rent: dec(100),
            deposit: dec(0),
            description: None,
        };
        let err = rent.create_shop(request, None).await.unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_occupancy_cannot_be_edited_by_hand() {
        let rent = service();
        let vacant = shop(&rent, "B-001", 3000).await;
        let update = UpdateShopRequest {
            status: Some(ShopStatus::Occupied),
            ..Default::default()
        };
        let err = rent.update_shop(vacant.id, update, None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));

        let maintenance = UpdateShopRequest {
            status: Some(ShopStatus::Maintenance),
            ..Default::default()
        };
        let updated = rent.update_shop(vacant.id, maintenance, None).await.unwrap();
        assert_eq!(updated.status, ShopStatus::Maintenance);

        let agreement = leased(&rent, "B-002").await;
        let release = UpdateShopRequest {
            status: Some(ShopStatus::Vacant),
            ..Default::default()
        };
        let err = rent.update_shop(agreement.shop_id, release, None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_agreements() {
        let rent = service();
        let free = shop(&rent, "C-001", 2000).await;
        rent.delete_shop(free.id, None).await.unwrap();
        assert!(matches!(rent.get_shop(free.id).await, Err(ApiError::NotFound(_))));

        let agreement = leased(&rent, "C-002").await;
        let err = rent.delete_shop(agreement.shop_id, None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));

        let terminate = UpdateAgreementRequest {
            status: Some(AgreementStatus::Terminated),
            ..Default::default()
        };
        rent.update_agreement(agreement.id, terminate, None).await.unwrap();
        let err = rent.delete_shop(agreement.shop_id, None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidState(_)));
    }
}
