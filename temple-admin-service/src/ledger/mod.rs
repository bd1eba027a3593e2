pub mod duplicates;
pub mod receipts;
pub mod service;

pub use duplicates::DuplicateGuard;
pub use receipts::ReceiptAllocator;
pub use service::{donation_amount, LedgerKind, LedgerService};
