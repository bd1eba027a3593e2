use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use temple_admin_api::{CreateTenantRequest, UpdateTenantRequest};
use temple_admin_db::models::rent::TenantModel;
use uuid::Uuid;

use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tenants", get(list_tenants).post(create_tenant))
        .route(
            "/tenants/{id}",
            get(get_tenant).put(update_tenant).delete(delete_tenant),
        )
}

async fn list_tenants(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<TenantModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.list_tenants().await?))
}

async fn create_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTenantRequest>,
) -> AppResult<(StatusCode, Json<TenantModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let tenant = state.services.rent.create_tenant(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

async fn get_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TenantModel>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.get_tenant(id).await?))
}

async fn update_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTenantRequest>,
) -> AppResult<Json<TenantModel>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    Ok(Json(state.services.rent.update_tenant(id, payload, Some(user.id)).await?))
}

async fn delete_tenant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let user = require_user(&state, &headers, Access::Write).await?;
    state.services.rent.delete_tenant(id, Some(user.id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
