use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use temple_admin_api::ReportQuery;
use temple_admin_service::report::{Dashboard, ImportSummary, ReportOutput};

use crate::auth::{require_user, Access};
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", get(export_report))
        .route("/reports/import", post(import_csv))
        .route("/dashboard", get(dashboard))
}

/// JSON for `format=json`, otherwise a download named after the report.
async fn export_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportQuery>,
) -> AppResult<Response> {
    require_user(&state, &headers, Access::Read).await?;
    let response = match state.services.reports.export(&query).await? {
        ReportOutput::Json(report) => Json(report).into_response(),
        ReportOutput::File(file) => (
            [
                (CONTENT_TYPE, file.content_type.to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.filename),
                ),
            ],
            file.body,
        )
            .into_response(),
    };
    Ok(response)
}

async fn import_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Json<ImportSummary>> {
    let user = require_user(&state, &headers, Access::Write).await?;
    Ok(Json(state.services.reports.import_csv(&body, Some(user.id)).await?))
}

async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Dashboard>> {
    require_user(&state, &headers, Access::Read).await?;
    Ok(Json(state.services.reports.dashboard().await?))
}
