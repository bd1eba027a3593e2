use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use temple_admin_api::{CreateLoanRequest, PayEmiRequest};
use temple_admin_db::models::rent::LoanModel;
use uuid::Uuid;

use super::AgreementQuery;
use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/loans", get(list_loans).post(create_loan))
        .route("/loans/{id}", get(get_loan))
        .route("/loans/{id}/pay", post(pay_emi))
        .route("/loans/{id}/default", post(mark_defaulted))
}

async fn list_loans(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AgreementQuery>,
) -> AppResult<Json<Vec<LoanModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.list_loans(query.agreement_id).await?))
}

async fn create_loan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<LoanModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let loan = state.services.rent.create_loan(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

async fn get_loan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LoanModel>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.rent.get_loan(id).await?))
}

async fn pay_emi(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Option<Json<PayEmiRequest>>,
) -> AppResult<Json<LoanModel>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let request = payload.map(|Json(p)| p).unwrap_or_default();
    Ok(Json(state.services.rent.pay_emi(id, request, Some(user.id)).await?))
}

async fn mark_defaulted(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LoanModel>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    Ok(Json(state.services.rent.mark_loan_defaulted(id, Some(user.id)).await?))
}
