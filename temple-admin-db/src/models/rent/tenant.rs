use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use temple_admin_api::TenantStatus;
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - A person or business renting a shop.
/// - Cannot be deleted while any of its agreements is Active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantModel {
    pub id: Uuid,
    pub name: String,
    /// Ten digit contact number
    pub phone: HeaplessString<10>,
    pub email: Option<String>,
    pub address: String,
    pub business_type: String,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(TenantModel);

impl TenantModel {
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}
