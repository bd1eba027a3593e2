use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use temple_admin_api::{
    ApiError, CreateDonationRequest, CreateExpenseRequest, ReceiptKind, UpdateTransactionRequest,
};
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::repository::Page;
use temple_admin_service::ledger::LedgerKind;
use uuid::Uuid;

use super::PageQuery;
use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donations", get(list_donations).post(create_donation))
        .route("/donations/{id}", put(update_donation).delete(delete_donation))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
        .route("/transactions", get(journal))
        .route("/receipts/{kind}/preview", get(preview_receipt))
}

async fn list_donations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<TransactionModel>>> {
    list(&state, &headers, LedgerKind::Donation, &query).await
}

async fn list_expenses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<TransactionModel>>> {
    list(&state, &headers, LedgerKind::Expense, &query).await
}

async fn create_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateDonationRequest>,
) -> AppResult<(StatusCode, Json<TransactionModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let donation = state.services.ledger.create_donation(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(donation)))
}

async fn create_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateExpenseRequest>,
) -> AppResult<(StatusCode, Json<TransactionModel>)> {
    let user = require_user(&state, &headers, Access::Write).await?;
    let expense = state.services.ledger.create_expense(payload, Some(user.id)).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> AppResult<Json<TransactionModel>> {
    update(&state, &headers, LedgerKind::Donation, id, payload).await
}

async fn update_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> AppResult<Json<TransactionModel>> {
    update(&state, &headers, LedgerKind::Expense, id, payload).await
}

async fn delete_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete(&state, &headers, LedgerKind::Donation, id).await
}

async fn delete_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    delete(&state, &headers, LedgerKind::Expense, id).await
}

/// Every stored transaction, soft-deleted ones included.
async fn journal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<TransactionModel>>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.ledger.journal(query.request()).await?))
}

async fn preview_receipt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
) -> AppResult<Json<Value>> {
    require_user(&state, &headers, Access::Read).await?;
    let kind: ReceiptKind = kind
        .parse()
        .map_err(|_| ApiError::field("kind", "must be donation or rent"))?;
    let receipt_number = state.services.ledger.preview_receipt(kind).await?;
    Ok(Json(json!({ "receipt_number": receipt_number })))
}

async fn list(
    state: &AppState,
    headers: &HeaderMap,
    kind: LedgerKind,
    query: &PageQuery,
) -> AppResult<Json<Page<TransactionModel>>> {
    require_user(state, headers, Access::Read).await?;
    Ok(Json(state.services.ledger.list(kind, query.request()).await?))
}

async fn update(
    state: &AppState,
    headers: &HeaderMap,
    kind: LedgerKind,
    id: Uuid,
    payload: UpdateTransactionRequest,
) -> AppResult<Json<TransactionModel>> {
    let user = require_user(state, headers, Access::Write).await?;
    Ok(Json(
        state.services.ledger.update(kind, id, payload, Some(user.id)).await?,
    ))
}

async fn delete(
    state: &AppState,
    headers: &HeaderMap,
    kind: LedgerKind,
    id: Uuid,
) -> AppResult<StatusCode> {
    let user = require_user(state, headers, Access::Write).await?;
    state.services.ledger.delete(kind, id, Some(user.id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
