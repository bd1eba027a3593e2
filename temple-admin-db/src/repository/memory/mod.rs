//! Process-local repositories backing the `memory` storage backend.

pub mod entities;
pub mod repository;

pub use entities::InMemoryReceiptCounter;
pub use repository::InMemoryRepository;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use sqlx::Postgres;
    use temple_admin_api::{ReceiptKind, ShopStatus, TransactionType};
    use uuid::Uuid;

    use super::*;
    use crate::models::ledger::TransactionModel;
    use crate::models::rent::ShopModel;
    use crate::repository::{PageRequest, ReceiptCounterRepository, ShopRepository, TransactionRepository};
    use crate::utils::to_heapless;

    fn shop(number: &str) -> ShopModel {
        ShopModel {
            id: Uuid::new_v4(),
            shop_number: to_heapless(number).unwrap(),
            size: "10x12".to_string(),
            monthly_rent: Decimal::new(5000, 0),
            deposit: Decimal::new(20000, 0),
            status: ShopStatus::Vacant,
            description: None,
            tenant_id: None,
            agreement_id: None,
            created_at: Utc::now(),
            audit_log_id: None,
        }
    }

    fn tx(day: u32, receipt: &str) -> TransactionModel {
        let mut tx = TransactionModel::new(
            NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            TransactionType::Donation,
            "General",
            "",
            Decimal::new(101, 0),
        );
        tx.receipt_number = Some(to_heapless(receipt).unwrap());
        tx
    }

    #[tokio::test]
    async fn test_create_sets_audit_id_and_rejects_duplicate_ids() {
        let repo: Arc<dyn ShopRepository<Postgres>> = Arc::new(InMemoryRepository::new());
        let audit_id = Uuid::new_v4();
        let a = shop("A-001");

        let saved = repo.create_batch(vec![a.clone()], Some(audit_id)).await.unwrap();
        assert_eq!(saved[0].audit_log_id, Some(audit_id));
        assert!(repo.create_batch(vec![a.clone()], None).await.is_err());

        let found = repo.find_by_shop_number("a-001").await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(a.id));
    }

    #[tokio::test]
    async fn test_update_load_and_delete() {
        let repo: Arc<dyn ShopRepository<Postgres>> = Arc::new(InMemoryRepository::new());
        let mut a = shop("A-002");
        repo.create_batch(vec![a.clone()], None).await.unwrap();

        a.monthly_rent = Decimal::new(6000, 0);
        let updated = repo.update_batch(vec![a.clone()], None).await.unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(repo.load(a.id).await.unwrap().monthly_rent, Decimal::new(6000, 0));

        let missing = Uuid::new_v4();
        let loaded = repo.load_batch(&[a.id, missing]).await.unwrap();
        assert!(loaded[0].is_some());
        assert!(loaded[1].is_none());

        assert_eq!(repo.delete_batch(&[a.id], None).await.unwrap(), 1);
        assert!(repo.load(a.id).await.is_err());
        assert_eq!(repo.exist_by_ids(&[a.id]).await.unwrap(), vec![(a.id, false)]);
    }

    #[tokio::test]
    async fn test_transactions_page_newest_first() {
        let repo: Arc<dyn TransactionRepository<Postgres>> = Arc::new(InMemoryRepository::new());
        repo.create_batch(vec![tx(1, "DON-000001"), tx(5, "DON-000002"), tx(3, "DON-000003")], None)
            .await
            .unwrap();

        let page = repo.load_page(PageRequest::new(2, 0)).await.unwrap();
        let receipts: Vec<_> = page.items.iter().filter_map(|t| t.receipt_str()).collect();
        assert_eq!(receipts, vec!["DON-000002", "DON-000003"]);
        assert!(page.has_more());

        let found = repo.find_by_receipt_number("DON-000003").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_receipt_counter_is_per_kind() {
        let counter: Arc<dyn ReceiptCounterRepository<Postgres>> = Arc::new(InMemoryReceiptCounter::new());
        assert_eq!(counter.peek_next_value(ReceiptKind::Donation).await.unwrap(), 1);
        assert_eq!(counter.next_value(ReceiptKind::Donation).await.unwrap(), 1);
        assert_eq!(counter.next_value(ReceiptKind::Donation).await.unwrap(), 2);
        assert_eq!(counter.next_value(ReceiptKind::RentIncome).await.unwrap(), 1);
        assert_eq!(counter.peek_next_value(ReceiptKind::Donation).await.unwrap(), 3);
    }
}
