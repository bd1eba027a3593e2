pub mod auditable;
pub mod identifiable;
pub mod audit;
pub mod ledger;
pub mod rent;
pub mod user;

// Re-exports
pub use auditable::*;
pub use identifiable::*;
pub use audit::*;
pub use ledger::*;
pub use rent::*;
pub use user::*;
