use sqlx::Database;
use std::time::Duration;

use crate::ledger::{DuplicateGuard, LedgerService};
use crate::rent::RentService;
use crate::report::ReportService;
use crate::repositories::Repositories;
use crate::users::{SessionStore, UserService};

/// Tunables the services are built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Identical submissions within this window are rejected; zero disables the check.
    pub duplicate_window: Duration,
    pub session_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            duplicate_window: Duration::from_secs(30),
            session_ttl: Duration::from_secs(8 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Every service over one set of repositories.
pub struct Services<DB: Database> {
    pub ledger: LedgerService<DB>,
    pub rent: RentService<DB>,
    pub users: UserService<DB>,
    pub reports: ReportService<DB>,
}

impl<DB: Database> Services<DB> {
    pub fn new(repos: Repositories<DB>, settings: &ServiceSettings) -> Self {
        Self {
            ledger: LedgerService::new(repos.clone(), DuplicateGuard::new(settings.duplicate_window)),
            rent: RentService::new(repos.clone()),
            users: UserService::new(
                repos.clone(),
                SessionStore::new(settings.session_ttl),
                settings.bcrypt_cost,
            ),
            reports: ReportService::new(repos),
        }
    }
}
