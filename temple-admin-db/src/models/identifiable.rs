use uuid::Uuid;

/// Trait for records keyed by a UUID primary key
pub trait Identifiable {
    /// Returns the primary key of the record
    fn get_id(&self) -> Uuid;
}

/// Implements [`Identifiable`] and [`crate::models::Auditable`] for models
/// exposing `id` and `audit_log_id` fields.
#[macro_export]
macro_rules! impl_audited_model {
    ($model:ty) => {
        impl $crate::models::Identifiable for $model {
            fn get_id(&self) -> uuid::Uuid {
                self.id
            }
        }

        impl $crate::models::Auditable for $model {
            fn get_audit_log_id(&self) -> Option<uuid::Uuid> {
                self.audit_log_id
            }

            fn set_audit_log_id(&mut self, audit_log_id: Option<uuid::Uuid>) {
                self.audit_log_id = audit_log_id;
            }
        }
    };
}
