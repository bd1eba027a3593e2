pub mod ledger;
pub mod rent;
pub mod user;

pub use ledger::*;
pub use rent::*;
pub use user::*;
