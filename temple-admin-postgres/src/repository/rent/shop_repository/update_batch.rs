use async_trait::async_trait;
use sqlx::Postgres;
use std::error::Error;
use temple_admin_db::models::rent::ShopModel;
use temple_admin_db::repository::UpdateBatch;
use uuid::Uuid;

use super::repo_impl::ShopRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, ShopModel> for ShopRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ShopModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ShopModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = self.pool.begin().await?;
        for mut item in items {
            item.audit_log_id = audit_log_id;
            let result = sqlx::query(
                r#"
                UPDATE shops
                SET shop_number = $2, size = $3, monthly_rent = $4, deposit = $5, status = $6,
                    description = $7, tenant_id = $8, agreement_id = $9, audit_log_id = $10
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.shop_number.as_str())
            .bind(&item.size)
            .bind(item.monthly_rent)
            .bind(item.deposit)
            .bind(item.status)
            .bind(&item.description)
            .bind(item.tenant_id)
            .bind(item.agreement_id)
            .bind(item.audit_log_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() > 0 {
                updated_items.push(item);
            }
        }
        tx.commit().await?;
        Ok(updated_items)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{create_test_shop, setup_test_context, unique_shop_number};
    use rust_decimal::Decimal;
    use serial_test::serial;
    use temple_admin_db::repository::{CreateBatch, Load, UpdateBatch};

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_update_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let shop_repo = ctx.repos.shop_repository();

        let mut shop = create_test_shop(&unique_shop_number());
        shop_repo.create_batch(vec![shop.clone()], None).await?;

        shop.monthly_rent = Decimal::new(7500, 0);
        let updated = shop_repo.update_batch(vec![shop.clone()], None).await?;
        assert_eq!(updated.len(), 1);

        let reloaded = shop_repo.load(shop.id).await?;
        assert_eq!(reloaded.monthly_rent, Decimal::new(7500, 0));
        Ok(())
    }
}
