use chrono::{NaiveDate, Utc};
use sqlx::Database;
use temple_admin_api::{
    ApiError, ApiResult, CreatePenaltyRequest, PenaltyStatus, SettlePenaltyRequest,
};
use temple_admin_db::models::rent::RentPenaltyModel;
use temple_admin_db::repository::{CreateBatch, LoadAll, PenaltyRepository, UpdateBatch};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::RentService;
use crate::finance::penalty_amount;
use crate::support::{clean, today};

impl<DB: Database> RentService<DB> {
    pub async fn create_penalty(
        &self,
        request: CreatePenaltyRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<RentPenaltyModel> {
        request.validate()?;
        let mut agreement = self.repos.agreement(request.agreement_id).await?;

        let rent_amount = request.rent_amount.unwrap_or(agreement.monthly_rent);
        let penalty = RentPenaltyModel {
            id: Uuid::new_v4(),
            agreement_id: agreement.id,
            due_date: request.due_date,
            rent_amount,
            penalty_rate: request.penalty_rate,
            penalty_amount: penalty_amount(rent_amount, request.penalty_rate),
            status: PenaltyStatus::Pending,
            paid_date: None,
            reason: clean(request.reason),
            created_at: Utc::now(),
            audit_log_id: None,
        };

        let audit_log_id = self.repos.audit(actor, "penalty.create").await?;
        let mut saved = self
            .repos
            .penalties
            .create_batch(vec![penalty], Some(audit_log_id))
            .await?;
        let penalty = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("penalty was not stored".to_string()))?;

        agreement.add_pending_penalty(penalty.id);
        self.repos.agreements.update_batch(vec![agreement], Some(audit_log_id)).await?;

        info!(penalty_id = %penalty.id, amount = %penalty.penalty_amount, "penalty raised");
        Ok(penalty)
    }

    /// All penalties, or those of one agreement ordered by due date.
    pub async fn list_penalties(&self, agreement_id: Option<Uuid>) -> ApiResult<Vec<RentPenaltyModel>> {
        match agreement_id {
            Some(agreement_id) => Ok(self.repos.penalties.find_by_agreement_id(agreement_id).await?),
            None => {
                let mut penalties = self.repos.penalties.load_all().await?;
                penalties.sort_by(|a, b| b.due_date.cmp(&a.due_date));
                Ok(penalties)
            }
        }
    }

    pub async fn settle_penalty(
        &self,
        id: Uuid,
        request: SettlePenaltyRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<RentPenaltyModel> {
        let penalty = self.repos.penalty(id).await?;
        let paid_date = request.paid_date.unwrap_or_else(today);
        let audit_log_id = self.repos.audit(actor, "penalty.settle").await?;
        self.apply_penalty_settlement(penalty, paid_date, audit_log_id).await
    }

    /// Pending to Paid, removing the penalty from the agreement's pending set.
    pub(crate) async fn apply_penalty_settlement(
        &self,
        mut penalty: RentPenaltyModel,
        paid_date: NaiveDate,
        audit_log_id: Uuid,
    ) -> ApiResult<RentPenaltyModel> {
        if !penalty.is_pending() {
            return Err(ApiError::InvalidState(format!(
                "penalty {} is already paid",
                penalty.id
            )));
        }
        penalty.status = PenaltyStatus::Paid;
        penalty.paid_date = Some(paid_date);

        let id = penalty.id;
        let mut updated = self
            .repos
            .penalties
            .update_batch(vec![penalty], Some(audit_log_id))
            .await?;
        let penalty = updated.pop().ok_or_else(|| ApiError::not_found("Penalty", id))?;

        let mut agreement = self.repos.agreement(penalty.agreement_id).await?;
        agreement.remove_pending_penalty(penalty.id);
        self.repos.agreements.update_batch(vec![agreement], Some(audit_log_id)).await?;

        info!(penalty_id = %id, %paid_date, "penalty settled");
        Ok(penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use rust_decimal::Decimal;
    use temple_admin_api::{ApiError, CreatePenaltyRequest, PenaltyStatus, SettlePenaltyRequest};
    use uuid::Uuid;

    fn penalty_request(agreement_id: Uuid, due: u32) -> CreatePenaltyRequest {
        CreatePenaltyRequest {
            agreement_id,
            due_date: date(2026, 3, due),
            rent_amount: None,
            penalty_rate: Decimal::new(15, 1),
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_penalty_lifecycle() {
        let rent = service();
        let agreement = leased(&rent, "P-001").await;

        let penalty = rent
            .create_penalty(penalty_request(agreement.id, 5), None)
            .await
            .unwrap();
        assert_eq!(penalty.rent_amount, dec(5000));
        assert_eq!(penalty.penalty_amount, Decimal::new(7500, 2));
        assert_eq!(penalty.status, PenaltyStatus::Pending);
        assert_eq!(
            rent.get_agreement(agreement.id).await.unwrap().pending_penalty_ids,
            vec![penalty.id]
        );

        let settled = rent
            .settle_penalty(
                penalty.id,
                SettlePenaltyRequest {
                    paid_date: Some(date(2026, 3, 9)),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(settled.status, PenaltyStatus::Paid);
        assert_eq!(settled.paid_date, Some(date(2026, 3, 9)));
        assert!(rent
            .get_agreement(agreement.id)
            .await
            .unwrap()
            .pending_penalty_ids
            .is_empty());

        let again = rent
            .settle_penalty(penalty.id, SettlePenaltyRequest::default(), None)
            .await;
        assert!(matches!(again, Err(ApiError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_penalties_listed_by_due_date() {
        let rent = service();
        let agreement = leased(&rent, "P-002").await;
        let late = rent
            .create_penalty(penalty_request(agreement.id, 20), None)
            .await
            .unwrap();
        let early = rent
            .create_penalty(penalty_request(agreement.id, 2), None)
            .await
            .unwrap();

        let listed: Vec<_> = rent
            .list_penalties(Some(agreement.id))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(listed, vec![early.id, late.id]);
        assert_eq!(rent.list_penalties(None).await.unwrap().len(), 2);
    }
}
