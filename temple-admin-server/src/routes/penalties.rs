use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use temple_admin_api::{CreatePenaltyRequest, SettlePenaltyRequest};
use temple_admin_db::models::rent::RentPenaltyModel;
use uuid::Uuid;

use super::AgreementQuery;
use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/penalties", get(list_penalties).post(create_penalty))
        .route("/penalties/{id}/settle", post(settle_penalty))
}

async fn list_penalties(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AgreementQuery>,
) -> AppResult<Json<Vec<RentPenaltyModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.list_penalties(query.agreement_id).await?))
}

async fn create_penalty(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePenaltyRequest>,
) -> AppResult<(StatusCode, Json<RentPenaltyModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let penalty = state.services.rent.create_penalty(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(penalty)))
}

async fn settle_penalty(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Option<Json<SettlePenaltyRequest>>,
) -> AppResult<Json<RentPenaltyModel>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let request = payload.map(|Json(p)| p).unwrap_or_default();
    Ok(Json(
        state.services.rent.settle_penalty(id, request, Some(user.id)).await?,
    ))
}
