use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use temple_admin_api::RentCollectionRequest;
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_service::rent::RentCollection;

use super::AgreementQuery;
use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/rent-payments", get(list_rent_payments).post(collect_rent))
}

async fn list_rent_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AgreementQuery>,
) -> AppResult<Json<Vec<TransactionModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(
        state.services.ledger.list_rent_payments(query.agreement_id).await?,
    ))
}

async fn collect_rent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RentCollectionRequest>,
) -> AppResult<(StatusCode, Json<RentCollection>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let collection = state.services.rent.collect_rent(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}
