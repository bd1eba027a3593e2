//! Typed client and session-scoped data layer for the temple administration API.

pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod retry;
pub mod session;

pub use client::{ImportSummary, RentCollection, TempleClient};
pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, Download};
pub use retry::RetryPolicy;
pub use session::Session;
