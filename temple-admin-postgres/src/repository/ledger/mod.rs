pub mod receipt_counter_repository;
pub mod transaction_repository;

pub use receipt_counter_repository::ReceiptCounterRepositoryImpl;
pub use transaction_repository::TransactionRepositoryImpl;
