pub mod diagnostics;
pub mod postgres_repositories;
pub mod repository;
pub mod settings;
pub mod utils;

pub use postgres_repositories::PostgresRepositories;
pub use settings::DatabaseSettings;
pub use repository::db_init::{cleanup_database, init_database, reset_database, run_migrations};

#[cfg(test)]
pub mod test_helper;
