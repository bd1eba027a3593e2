use sqlx::Postgres;
use std::sync::Arc;
use temple_admin_postgres::PostgresRepositories;
use temple_admin_service::{Repositories, ServiceSettings, Services};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services<Postgres>>,
}

impl AppState {
    pub fn new(repos: Repositories<Postgres>, settings: &ServiceSettings) -> Self {
        Self {
            services: Arc::new(Services::new(repos, settings)),
        }
    }

    /// State over process-local stores.
    pub fn in_memory(settings: &ServiceSettings) -> Self {
        Self::new(Repositories::in_memory(), settings)
    }
}

/// Wires every Postgres repository into the service-facing bundle.
pub fn postgres_repositories(pg: &PostgresRepositories) -> Repositories<Postgres> {
    Repositories {
        shops: pg.shop_repository(),
        tenants: pg.tenant_repository(),
        agreements: pg.agreement_repository(),
        loans: pg.loan_repository(),
        penalties: pg.penalty_repository(),
        transactions: pg.transaction_repository(),
        receipt_counters: pg.receipt_counter_repository(),
        users: pg.user_repository(),
        audit_logs: pg.audit_log_repository(),
    }
}
