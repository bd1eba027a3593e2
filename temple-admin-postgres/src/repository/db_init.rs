//! Schema setup and teardown for the trust database.
//!
//! `run_migrations` is the normal path and records applied versions in
//! `_sqlx_migrations`. `reset_database` replays the raw SQL under
//! `cleanup/` and then `migrations/`, which `db-check --reset` uses to rebuild
//! a scratch database from nothing.

use sqlx::PgPool;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Ascending,
    Descending,
}

/// Applies the embedded migrations, skipping those already recorded.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await?;
    info!("database migrations applied");
    Ok(())
}

/// Creates every table and type by executing `migrations/*.sql` in file order.
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    execute_dir(pool, &crate_dir("migrations"), Order::Ascending).await
}

/// Drops every table and type, including the migration ledger.
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    execute_dir(pool, &crate_dir("cleanup"), Order::Descending).await
}

/// Drops and recreates the schema. All data is lost.
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use temple_admin_postgres::repository::db_init::reset_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), sqlx::Error> {
/// reset_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn reset_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    cleanup_database(pool).await?;
    init_database(pool).await
}

fn crate_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

fn sql_files(dir: &Path, order: Order) -> std::io::Result<Vec<PathBuf>> {
    let mut files = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .collect::<Vec<_>>();
    files.sort();
    if order == Order::Descending {
        files.reverse();
    }
    Ok(files)
}

async fn execute_dir(pool: &PgPool, dir: &Path, order: Order) -> Result<(), sqlx::Error> {
    for path in sql_files(dir, order).map_err(sqlx::Error::Io)? {
        let sql = fs::read_to_string(&path).map_err(sqlx::Error::Io)?;
        info!(file = %path.display(), "executing sql file");
        sqlx::raw_sql(&sql).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_migration_files_are_ordered() {
        let files = sql_files(&crate_dir("migrations"), Order::Ascending).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names.len(), 4);
        assert!(names[0].ends_with("_enum_types.sql"));
        assert!(names[3].ends_with("_ledger.sql"));

        let reversed = sql_files(&crate_dir("migrations"), Order::Descending).unwrap();
        assert_eq!(reversed.first(), files.last());
    }

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_reset_then_migrate() -> Result<(), Box<dyn std::error::Error>> {
        let database_url = std::env::var("DATABASE_URL")?;
        let pool = PgPool::connect(&database_url).await?;

        reset_database(&pool).await?;
        cleanup_database(&pool).await?;
        run_migrations(&pool).await?;

        Ok(())
    }
}
