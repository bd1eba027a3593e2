use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use temple_admin_api::{CreateShopRequest, UpdateShopRequest};
use temple_admin_db::models::rent::ShopModel;
use uuid::Uuid;

use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shops", get(list_shops).post(create_shop))
        .route(
            "/shops/{id}",
            get(get_shop).put(update_shop).delete(delete_shop),
        )
}

async fn list_shops(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<ShopModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.list_shops().await?))
}

async fn create_shop(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateShopRequest>,
) -> AppResult<(StatusCode, Json<ShopModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let shop = state.services.rent.create_shop(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

async fn get_shop(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ShopModel>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.get_shop(id).await?))
}

async fn update_shop(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShopRequest>,
) -> AppResult<Json<ShopModel>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    Ok(Json(state.services.rent.update_shop(id, payload, Some(user.id)).await?))
}

async fn delete_shop(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let user = require_user(&state, &headers, Access::Write).await?;
    state.services.rent.delete_shop(id, Some(user.id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
