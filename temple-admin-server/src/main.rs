use anyhow::Context;
use temple_admin_postgres::{run_migrations, PostgresRepositories};
use temple_admin_server::config::StorageBackend;
use temple_admin_server::state::postgres_repositories;
use temple_admin_server::{init_tracing, router, AppConfig, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.server.log_level);

    let settings = config.service_settings();
    let state = match config.storage {
        StorageBackend::Memory => {
            warn!("using in-memory storage; records are lost on restart");
            AppState::in_memory(&settings)
        }
        StorageBackend::Postgres => {
            let pg = PostgresRepositories::connect(&config.database.url, config.database.max_connections)
                .await
                .context("connecting to database")?;
            if config.database.run_migrations {
                run_migrations(pg.pool()).await.context("applying migrations")?;
            }
            AppState::new(postgres_repositories(&pg), &settings)
        }
    };

    match &config.auth.admin_password {
        Some(password) => {
            state
                .services
                .users
                .bootstrap_admin(&config.auth.admin_username, &config.auth.admin_email, password)
                .await
                .context("bootstrapping admin")?;
        }
        None => info!("no admin password configured; skipping admin bootstrap"),
    }

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, storage = ?config.storage, "temple admin server listening");
    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")?;
    Ok(())
}
