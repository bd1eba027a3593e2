pub mod agreement_repository;
pub mod loan_repository;
pub mod penalty_repository;
pub mod shop_repository;
pub mod tenant_repository;

pub use agreement_repository::AgreementRepositoryImpl;
pub use loan_repository::LoanRepositoryImpl;
pub use penalty_repository::PenaltyRepositoryImpl;
pub use shop_repository::ShopRepositoryImpl;
pub use tenant_repository::TenantRepositoryImpl;
