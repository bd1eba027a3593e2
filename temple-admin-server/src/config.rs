use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use temple_admin_postgres::DatabaseSettings;
use temple_admin_service::ServiceSettings;

/// Where records are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; state is lost on restart.
    Memory,
    #[default]
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Initial Admin, created only while the user store is empty
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    pub admin_password: Option<String>,
}

fn default_session_ttl_secs() -> u64 {
    8 * 60 * 60
}

fn default_bcrypt_cost() -> u32 {
    ServiceSettings::default().bcrypt_cost
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@temple.local".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl_secs(),
            bcrypt_cost: default_bcrypt_cost(),
            admin_username: default_admin_username(),
            admin_email: default_admin_email(),
            admin_password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Window for rejecting identical donation/expense submissions; 0 disables it
    #[serde(default = "default_duplicate_window_secs")]
    pub duplicate_window_secs: u64,
}

fn default_duplicate_window_secs() -> u64 {
    30
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            duplicate_window_secs: default_duplicate_window_secs(),
        }
    }
}

/// Whole server configuration: `config/config.toml` (optional) layered
/// with `TEMPLE_ADMIN__<SECTION>__<KEY>` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("TEMPLE_ADMIN").separator("__"))
            .build()?
            .try_deserialize()
            .map_err(|e| ConfigError::Message(format!("Configuration could not be loaded: {e}")))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            duplicate_window: Duration::from_secs(self.ledger.duplicate_window_secs),
            session_ttl: Duration::from_secs(self.auth.session_ttl_secs),
            bcrypt_cost: self.auth.bcrypt_cost,
        }
    }
}
