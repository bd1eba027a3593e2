use serde::{Deserialize, Serialize};
use std::path::Path;
use temple_admin_db::models::user::UserModel;

use crate::error::{ClientError, ClientResult};

/// `{token, user}` as returned by login and kept across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserModel,
}

impl Session {
    pub fn can_write(&self) -> bool {
        self.user.role.can_write()
    }

    pub fn can_manage_users(&self) -> bool {
        self.user.role.can_manage_users()
    }

    pub fn save(&self, path: &Path) -> ClientResult<()> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| ClientError::Storage(format!("{}: {e}", path.display())))
    }

    /// `None` when nothing was stored or the stored file is unreadable.
    pub fn load(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use temple_admin_api::{UserRole, UserStatus};
    use uuid::Uuid;

    fn session(role: UserRole) -> Session {
        Session {
            token: "ab12".to_string(),
            user: UserModel {
                id: Uuid::new_v4(),
                username: "treasurer".try_into().unwrap(),
                email: "treasurer@temple.local".to_string(),
                password_hash: String::new(),
                role,
                status: UserStatus::Active,
                last_login: None,
                created_at: Utc::now(),
                audit_log_id: None,
            },
        }
    }

    #[test]
    fn test_role_checks() {
        assert!(!session(UserRole::Viewer).can_write());
        assert!(session(UserRole::Treasurer).can_write());
        assert!(!session(UserRole::Treasurer).can_manage_users());
        assert!(session(UserRole::Admin).can_manage_users());
    }

    #[test]
    fn test_save_and_restore() {
        let path = std::env::temp_dir().join(format!("temple-admin-session-{}.json", Uuid::new_v4()));
        let original = session(UserRole::Treasurer);
        original.save(&path).unwrap();
        assert_eq!(Session::load(&path), Some(original));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(Session::load(&path), None);
    }
}
