//! Connects with the configured database settings, checks the `users` schema
//! and samples table counts. Exits non-zero when anything is off.
//!
//! `db-check --reset` drops and recreates the schema first.

use anyhow::Context;
use temple_admin_postgres::diagnostics::run_diagnostics;
use temple_admin_postgres::settings::DatabaseSettings;
use temple_admin_postgres::{reset_database, PostgresRepositories};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = DatabaseSettings::load().context("loading database settings")?;
    info!(max_connections = settings.max_connections, "connecting to database");

    let repos = PostgresRepositories::connect(&settings.url, settings.max_connections)
        .await
        .context("connecting to database")?;

    if std::env::args().skip(1).any(|arg| arg == "--reset") {
        warn!("resetting database schema");
        reset_database(repos.pool())
            .await
            .context("resetting database")?;
    }

    let report = run_diagnostics(repos.pool())
        .await
        .context("running diagnostics")?;

    println!("{report}");
    if !report.is_healthy() {
        error!("database check failed");
        std::process::exit(1);
    }
    Ok(())
}
