use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use temple_admin_api::{CreateUserRequest, UpdateUserRequest};
use temple_admin_db::models::user::UserModel;
use uuid::Uuid;

use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

/// Admin-only account management.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<UserModel>>> {
    require_user(&state, &headers, Access::ManageUsers).await?;
    Ok(Json(state.services.users.list_users().await?))
}

async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserModel>)> {
    let admin = require_user(&state, &headers, Access::ManageUsers).await?;
    let user = state.services.users.create_user(payload, Some(admin.id)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserModel>> {
    let admin = require_user(&state, &headers, Access::ManageUsers).await?;
    Ok(Json(
        state.services.users.update_user(id, payload, Some(admin.id)).await?,
    ))
}

async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let admin = require_user(&state, &headers, Access::ManageUsers).await?;
    state.services.users.delete_user(id, Some(admin.id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
