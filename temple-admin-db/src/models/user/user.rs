use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use temple_admin_api::{UserRole, UserStatus};
use uuid::Uuid;

use crate::impl_audited_model;

/// # Documentation
/// - An operator of the administration service.
/// - `password_hash` is a bcrypt hash and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserModel {
    pub id: Uuid,
    /// Unique login name
    pub username: HeaplessString<50>,
    /// Unique, compared case-insensitively
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub audit_log_id: Option<Uuid>,
}

impl_audited_model!(UserModel);

impl UserModel {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
