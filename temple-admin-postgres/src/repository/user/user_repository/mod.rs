pub mod create_batch;
pub mod delete_batch;
pub mod load_batch;
pub mod repo_impl;
pub mod update_batch;

pub use repo_impl::UserRepositoryImpl;
