#[allow(clippy::module_inception)]
pub mod user;

pub use user::UserModel;
