use uuid::Uuid;

use super::identifiable::Identifiable;

/// Trait for records stamped with the audit log entry of their last mutation
pub trait Auditable: Identifiable {
    /// Returns the audit log entry of the last create/update, if any
    fn get_audit_log_id(&self) -> Option<Uuid>;

    /// Stamps the record with the audit log entry of the current mutation
    fn set_audit_log_id(&mut self, audit_log_id: Option<Uuid>);
}
