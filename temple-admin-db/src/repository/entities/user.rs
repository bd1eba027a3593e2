use async_trait::async_trait;
use sqlx::Database;

use crate::models::audit::AuditLogModel;
use crate::models::user::UserModel;
use crate::repository::{
    CreateBatch, DeleteBatch, Load, LoadAll, LoadBatch, UpdateBatch,
};

type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// User store with unique lookups.
#[async_trait]
pub trait UserRepository<DB: Database>:
    CreateBatch<DB, UserModel>
    + LoadBatch<DB, UserModel>
    + Load<DB, UserModel>
    + UpdateBatch<DB, UserModel>
    + DeleteBatch<DB>
    + LoadAll<DB, UserModel>
{
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserModel>>;

    /// Case-insensitive.
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserModel>>;

    async fn count(&self) -> RepoResult<usize>;
}

/// Append-only audit log.
#[async_trait]
pub trait AuditLogRepository<DB: Database>: LoadBatch<DB, AuditLogModel> {
    async fn create(&self, audit_log: &AuditLogModel) -> RepoResult<AuditLogModel>;
}
