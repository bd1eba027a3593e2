use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use temple_admin_db::repository::PageRequest;
use uuid::Uuid;

use crate::state::AppState;

mod agreements;
mod auth;
mod ledger;
mod loans;
mod penalties;
mod rent_payments;
mod reports;
mod shops;
mod tenants;
mod users;

/// Every `/api` route plus `/health`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(shops::router())
        .merge(tenants::router())
        .merge(agreements::router())
        .merge(loans::router())
        .merge(penalties::router())
        .merge(rent_payments::router())
        .merge(ledger::router())
        .merge(users::router())
        .merge(reports::router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `?page=&page_size=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest::for_page(self.page_size.unwrap_or(default.limit), self.page.unwrap_or(1))
    }
}

/// `?agreement_id=` on rent sub-resource lists.
#[derive(Debug, Default, Deserialize)]
pub struct AgreementQuery {
    pub agreement_id: Option<Uuid>,
}
