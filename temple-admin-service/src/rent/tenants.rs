use chrono::Utc;
use sqlx::Database;
use temple_admin_api::{
    ApiError, ApiResult, CreateTenantRequest, TenantStatus, UpdateTenantRequest,
};
use temple_admin_db::models::rent::TenantModel;
use temple_admin_db::repository::{AgreementRepository, CreateBatch, DeleteBatch, LoadAll, UpdateBatch};
use temple_admin_db::utils::to_heapless;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::RentService;
use crate::support::clean;

impl<DB: Database> RentService<DB> {
    pub async fn create_tenant(
        &self,
        request: CreateTenantRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<TenantModel> {
        request.validate()?;
        let tenant = TenantModel {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            phone: to_heapless(request.phone.trim()).map_err(|e| ApiError::field("phone", e))?,
            email: clean(request.email),
            address: request.address.trim().to_string(),
            business_type: request.business_type.trim().to_string(),
            status: TenantStatus::Active,
            created_at: Utc::now(),
            audit_log_id: None,
        };

        let audit_log_id = self.repos.audit(actor, "tenant.create").await?;
        let mut saved = self.repos.tenants.create_batch(vec![tenant], Some(audit_log_id)).await?;
        let tenant = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("tenant was not stored".to_string()))?;
        info!(tenant_id = %tenant.id, "tenant created");
        Ok(tenant)
    }

    /// All tenants ordered by name.
    pub async fn list_tenants(&self) -> ApiResult<Vec<TenantModel>> {
        let mut tenants = self.repos.tenants.load_all().await?;
        tenants.sort_by_key(|t| t.name.to_lowercase());
        Ok(tenants)
    }

    pub async fn get_tenant(&self, id: Uuid) -> ApiResult<TenantModel> {
        self.repos.tenant(id).await
    }

    pub async fn update_tenant(
        &self,
        id: Uuid,
        request: UpdateTenantRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<TenantModel> {
        request.validate()?;
        let mut tenant = self.repos.tenant(id).await?;

        if let Some(name) = request.name {
            tenant.name = name.trim().to_string();
        }
        if let Some(phone) = request.phone {
            tenant.phone = to_heapless(phone.trim()).map_err(|e| ApiError::field("phone", e))?;
        }
        if request.email.is_some() {
            tenant.email = clean(request.email);
        }
        if let Some(address) = request.address {
            tenant.address = address.trim().to_string();
        }
        if let Some(business_type) = request.business_type {
            tenant.business_type = business_type.trim().to_string();
        }
        if let Some(status) = request.status {
            tenant.status = status;
        }

        let audit_log_id = self.repos.audit(actor, "tenant.update").await?;
        let mut updated = self.repos.tenants.update_batch(vec![tenant], Some(audit_log_id)).await?;
        updated.pop().ok_or_else(|| ApiError::not_found("Tenant", id))
    }

    /// Hard delete; refused while any agreement references the tenant.
    pub async fn delete_tenant(&self, id: Uuid, actor: Option<Uuid>) -> ApiResult<()> {
        let tenant = self.repos.tenant(id).await?;
        let agreements = self.repos.agreements.find_by_tenant_id(id).await?;
        if agreements.iter().any(|a| a.is_active()) {
            return Err(ApiError::InvalidState(format!(
                "tenant {} has an active agreement",
                tenant.name
            )));
        }
        if !agreements.is_empty() {
            return Err(ApiError::InvalidState(format!(
                "tenant {} has agreement history and cannot be deleted",
                tenant.name
            )));
        }

        let audit_log_id = self.repos.audit(actor, "tenant.delete").await?;
        self.repos.tenants.delete_batch(&[id], Some(audit_log_id)).await?;
        info!(tenant_id = %id, "tenant deleted");
        Ok(())
    }
}
