use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::rent::{AgreementModel, LoanModel, RentPenaltyModel, ShopModel, TenantModel};
use crate::repository::{
    CreateBatch, DeleteBatch, ExistByIds, Load, LoadAll, LoadBatch, UpdateBatch,
};

type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Shop store: full CRUD plus lookup by printed shop number.
#[async_trait]
pub trait ShopRepository<DB: Database>:
    CreateBatch<DB, ShopModel>
    + LoadBatch<DB, ShopModel>
    + Load<DB, ShopModel>
    + UpdateBatch<DB, ShopModel>
    + DeleteBatch<DB>
    + ExistByIds<DB>
    + LoadAll<DB, ShopModel>
{
    async fn find_by_shop_number(&self, shop_number: &str) -> RepoResult<Option<ShopModel>>;
}

/// Tenant store: full CRUD.
pub trait TenantRepository<DB: Database>:
    CreateBatch<DB, TenantModel>
    + LoadBatch<DB, TenantModel>
    + Load<DB, TenantModel>
    + UpdateBatch<DB, TenantModel>
    + DeleteBatch<DB>
    + ExistByIds<DB>
    + LoadAll<DB, TenantModel>
{
}

impl<DB, R> TenantRepository<DB> for R
where
    DB: Database,
    R: CreateBatch<DB, TenantModel>
        + LoadBatch<DB, TenantModel>
        + Load<DB, TenantModel>
        + UpdateBatch<DB, TenantModel>
        + DeleteBatch<DB>
        + ExistByIds<DB>
        + LoadAll<DB, TenantModel>,
{
}

/// Agreement store. Agreements are never hard-deleted.
#[async_trait]
pub trait AgreementRepository<DB: Database>:
    CreateBatch<DB, AgreementModel>
    + LoadBatch<DB, AgreementModel>
    + Load<DB, AgreementModel>
    + UpdateBatch<DB, AgreementModel>
    + LoadAll<DB, AgreementModel>
{
    /// All agreements ever made for a shop, oldest first.
    async fn find_by_shop_id(&self, shop_id: Uuid) -> RepoResult<Vec<AgreementModel>>;

    /// All agreements of a tenant, oldest first.
    async fn find_by_tenant_id(&self, tenant_id: Uuid) -> RepoResult<Vec<AgreementModel>>;
}

/// Loan store. Loans are never hard-deleted.
#[async_trait]
pub trait LoanRepository<DB: Database>:
    CreateBatch<DB, LoanModel>
    + LoadBatch<DB, LoanModel>
    + Load<DB, LoanModel>
    + UpdateBatch<DB, LoanModel>
    + LoadAll<DB, LoanModel>
{
    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> RepoResult<Vec<LoanModel>>;
}

/// Penalty store. Penalties are never hard-deleted.
#[async_trait]
pub trait PenaltyRepository<DB: Database>:
    CreateBatch<DB, RentPenaltyModel>
    + LoadBatch<DB, RentPenaltyModel>
    + Load<DB, RentPenaltyModel>
    + UpdateBatch<DB, RentPenaltyModel>
    + LoadAll<DB, RentPenaltyModel>
{
    /// Penalties of an agreement ordered by due date.
    async fn find_by_agreement_id(&self, agreement_id: Uuid) -> RepoResult<Vec<RentPenaltyModel>>;
}
