use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - One audit log per service operation; every record created or updated by the
///   operation carries the id of the same audit log in its `audit_log_id`.
/// - `action` is a short machine-readable label, e.g. `agreement.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
    /// References UserModel.id; `None` for system operations such as bootstrap
    pub updated_by_user_id: Option<Uuid>,
    pub action: String,
}

impl AuditLogModel {
    pub fn new(updated_by_user_id: Option<Uuid>, action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            updated_at: Utc::now(),
            updated_by_user_id,
            action: action.into(),
        }
    }
}

impl Identifiable for AuditLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
