use chrono::Utc;
use serde::Serialize;
use sqlx::Database;
use temple_admin_api::{
    ApiError, ApiResult, CreateUserRequest, LoginRequest, UpdateUserRequest, UserRole, UserStatus,
};
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::{CreateBatch, DeleteBatch, LoadAll, UpdateBatch, UserRepository};
use temple_admin_db::utils::to_heapless;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::passwords::{hash_password, verify_password};
use super::sessions::SessionStore;
use crate::repositories::Repositories;

const BAD_CREDENTIALS: &str = "invalid username or password";

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserModel,
}

/// Accounts, credentials and bearer sessions.
pub struct UserService<DB: Database> {
    repos: Repositories<DB>,
    sessions: SessionStore,
    bcrypt_cost: u32,
}

impl<DB: Database> UserService<DB> {
    pub fn new(repos: Repositories<DB>, sessions: SessionStore, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            sessions,
            bcrypt_cost,
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest, actor: Option<Uuid>) -> ApiResult<UserModel> {
        request.validate()?;
        let username = request.username.trim();
        let email = request.email.trim().to_lowercase();

        if self.repos.users.find_by_username(username).await?.is_some() {
            return Err(ApiError::field("username", "username is already taken"));
        }
        self.ensure_email_free(&email, None).await?;

        let user = UserModel {
            id: Uuid::new_v4(),
            username: to_heapless(username).map_err(|e| ApiError::field("username", e))?,
            email,
            password_hash: self.hash(request.password).await?,
            role: request.role,
            status: request.status.unwrap_or(UserStatus::Active),
            last_login: None,
            created_at: Utc::now(),
            audit_log_id: None,
        };

        let audit_log_id = self.repos.audit(actor, "user.create").await?;
        let mut saved = self.repos.users.create_batch(vec![user], Some(audit_log_id)).await?;
        let user = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("user was not stored".to_string()))?;
        info!(username = %user.username, role = ?user.role, "user created");
        Ok(user)
    }

    pub async fn list_users(&self) -> ApiResult<Vec<UserModel>> {
        let mut users = self.repos.users.load_all().await?;
        users.sort_by(|a, b| a.username.as_str().cmp(b.username.as_str()));
        Ok(users)
    }

    pub async fn get_user(&self, id: Uuid) -> ApiResult<UserModel> {
        self.repos.user(id).await
    }

    /// Changing the password or deactivating the account ends its sessions.
    pub async fn update_user(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<UserModel> {
        request.validate()?;
        let mut user = self.repos.user(id).await?;

        let demoted = request.role.is_some_and(|r| r != UserRole::Admin);
        let deactivated = request.status == Some(UserStatus::Inactive);
        if (demoted || deactivated) && user.role == UserRole::Admin && user.is_active() {
            self.ensure_other_admin(id).await?;
        }

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            self.ensure_email_free(&email, Some(id)).await?;
            user.email = email;
        }
        let password_changed = request.password.is_some();
        if let Some(password) = request.password {
            user.password_hash = self.hash(password).await?;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(status) = request.status {
            user.status = status;
        }

        let audit_log_id = self.repos.audit(actor, "user.update").await?;
        let mut updated = self.repos.users.update_batch(vec![user], Some(audit_log_id)).await?;
        let user = updated.pop().ok_or_else(|| ApiError::not_found("User", id))?;

        if password_changed || !user.is_active() {
            self.sessions.close_for_user(id).await;
        }
        Ok(user)
    }

    /// Refuses to remove the caller's own account or the last active Admin.
    pub async fn delete_user(&self, id: Uuid, actor: Option<Uuid>) -> ApiResult<()> {
        let user = self.repos.user(id).await?;
        if actor == Some(id) {
            return Err(ApiError::InvalidState("you cannot delete your own account".to_string()));
        }
        if user.role == UserRole::Admin && user.is_active() {
            self.ensure_other_admin(id).await?;
        }

        let audit_log_id = self.repos.audit(actor, "user.delete").await?;
        self.repos.users.delete_batch(&[id], Some(audit_log_id)).await?;
        self.sessions.close_for_user(id).await;
        info!(username = %user.username, "user deleted");
        Ok(())
    }

    /// Accepts either the username or the email as the login name.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<LoginResponse> {
        request.validate()?;
        let name = request.username.trim();
        let found = match self.repos.users.find_by_username(name).await? {
            Some(user) => Some(user),
            None => self.repos.users.find_by_email(name).await?,
        };

        let Some(mut user) = found else {
            warn!(login = %name, "login for unknown user");
            return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
        };
        let hash = user.password_hash.clone();
        let password = request.password;
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        if !valid {
            warn!(username = %user.username, "login with wrong password");
            return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }
        if !user.is_active() {
            return Err(ApiError::Unauthorized("account is inactive".to_string()));
        }

        user.last_login = Some(Utc::now());
        let audit_log_id = self.repos.audit(Some(user.id), "user.login").await?;
        let mut updated = self.repos.users.update_batch(vec![user], Some(audit_log_id)).await?;
        let user = updated
            .pop()
            .ok_or_else(|| ApiError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

        let token = self.sessions.open(user.id).await;
        info!(username = %user.username, "user logged in");
        Ok(LoginResponse { token, user })
    }

    pub async fn logout(&self, token: &str) {
        self.sessions.close(token).await;
    }

    /// Resolves a bearer token to its current, active user.
    pub async fn authenticate(&self, token: &str) -> ApiResult<UserModel> {
        let session = self
            .sessions
            .get(token)
            .await
            .ok_or_else(|| ApiError::Unauthorized("invalid or expired token".to_string()))?;
        let user = match self.repos.user(session.user_id).await {
            Ok(user) => user,
            Err(ApiError::NotFound(_)) => {
                self.sessions.close(token).await;
                return Err(ApiError::Unauthorized("invalid or expired token".to_string()));
            }
            Err(e) => return Err(e),
        };
        if !user.is_active() {
            return Err(ApiError::Unauthorized("account is inactive".to_string()));
        }
        Ok(user)
    }

    /// Creates the first Admin when no user exists yet.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<Option<UserModel>> {
        if self.repos.users.count().await? > 0 {
            return Ok(None);
        }
        let admin = self
            .create_user(
                CreateUserRequest {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    role: UserRole::Admin,
                    status: Some(UserStatus::Active),
                },
                None,
            )
            .await?;
        warn!(username = %admin.username, "bootstrapped initial admin; change its password");
        Ok(Some(admin))
    }

    async fn hash(&self, password: String) -> ApiResult<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?
    }

    async fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> ApiResult<()> {
        match self.repos.users.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(ApiError::field("email", "email is already registered"))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_other_admin(&self, id: Uuid) -> ApiResult<()> {
        let others = self
            .repos
            .users
            .load_all()
            .await?
            .into_iter()
            .any(|u| u.id != id && u.role == UserRole::Admin && u.is_active());
        if others {
            Ok(())
        } else {
            Err(ApiError::InvalidState(
                "at least one active admin must remain".to_string(),
            ))
        }
    }
}
