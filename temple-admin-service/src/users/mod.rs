pub mod passwords;
pub mod service;
pub mod sessions;

pub use service::{LoginResponse, UserService};
pub use sessions::{Session, SessionStore};
