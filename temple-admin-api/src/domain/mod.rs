pub mod enums;
pub mod ledger;
pub mod report;
pub mod rent;
pub mod user;
pub mod validation;

pub use enums::*;
pub use ledger::*;
pub use report::*;
pub use rent::*;
pub use user::*;
