//! HTTP surface of the temple administration service.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use routes::router;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed by tests.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
