pub mod finance;
pub mod ledger;
pub mod rent;
pub mod report;
pub mod repositories;
pub mod services;
pub mod support;
pub mod users;

pub use repositories::Repositories;
pub use services::{ServiceSettings, Services};
