use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use temple_admin_api::{CreateAgreementRequest, UpdateAgreementRequest};
use temple_admin_db::models::rent::AgreementModel;
use uuid::Uuid;

use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/agreements", get(list_agreements).post(create_agreement))
        .route("/agreements/{id}", get(get_agreement).put(update_agreement))
}

async fn list_agreements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<AgreementModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.list_agreements().await?))
}

/// Occupies the shop and books any deposit and advance as rent income.
async fn create_agreement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAgreementRequest>,
) -> AppResult<(StatusCode, Json<AgreementModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let agreement = state.services.rent.create_agreement(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(agreement)))
}

async fn get_agreement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AgreementModel>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.get_agreement(id).await?))
}

async fn update_agreement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAgreementRequest>,
) -> AppResult<Json<AgreementModel>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    Ok(Json(
        state.services.rent.update_agreement(id, payload, Some(user.id)).await?,
    ))
}
