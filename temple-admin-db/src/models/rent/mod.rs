pub mod agreement;
pub mod loan;
pub mod penalty;
pub mod shop;
pub mod tenant;

pub use agreement::AgreementModel;
pub use loan::LoanModel;
pub use penalty::RentPenaltyModel;
pub use shop::ShopModel;
pub use tenant::TenantModel;
