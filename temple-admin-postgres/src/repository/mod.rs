pub mod audit;
pub mod db_init;
pub mod ledger;
pub mod rent;
pub mod user;

pub use audit::AuditLogRepositoryImpl;
pub use ledger::{ReceiptCounterRepositoryImpl, TransactionRepositoryImpl};
pub use rent::{
    AgreementRepositoryImpl, LoanRepositoryImpl, PenaltyRepositoryImpl, ShopRepositoryImpl,
    TenantRepositoryImpl,
};
pub use user::UserRepositoryImpl;
