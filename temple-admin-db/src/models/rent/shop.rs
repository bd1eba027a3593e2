use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use temple_admin_api::ShopStatus;
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - A rentable shop unit owned by the trust.
/// - `tenant_id` / `agreement_id` are back-references to the Active agreement occupying the shop.
///
/// # Invariant
/// - Referenced by an Active agreement => `status == Occupied`.
/// - No Active agreement => `status` is `Vacant` (or `Maintenance` when set manually).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopModel {
    pub id: Uuid,

    /// Printed shop number, e.g. `A-010`. Unique.
    pub shop_number: HeaplessString<20>,
    pub size: String,
    pub monthly_rent: Decimal,
    pub deposit: Decimal,
    pub status: ShopStatus,
    pub description: Option<String>,

    /// References TenantModel.id
    pub tenant_id: Option<Uuid>,
    /// References AgreementModel.id
    pub agreement_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(ShopModel);

impl ShopModel {
    /// Occupies the shop on behalf of an agreement.
    pub fn occupy(&mut self, tenant_id: Uuid, agreement_id: Uuid) {
        self.status = ShopStatus::Occupied;
        self.tenant_id = Some(tenant_id);
        self.agreement_id = Some(agreement_id);
    }

    /// Releases the shop, clearing both back-references.
    pub fn vacate(&mut self) {
        self.status = ShopStatus::Vacant;
        self.tenant_id = None;
        self.agreement_id = None;
    }

    pub fn is_vacant(&self) -> bool {
        self.status == ShopStatus::Vacant
    }
}
