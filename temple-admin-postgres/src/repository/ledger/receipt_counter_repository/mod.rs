pub mod repo_impl;

pub use repo_impl::ReceiptCounterRepositoryImpl;
