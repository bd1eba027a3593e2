use serde::Serialize;
use sqlx::Database;
use temple_admin_api::domain::validation::validate_positive;
use temple_admin_api::{ApiError, ApiResult, ReceiptKind, RentCollectionRequest};
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::models::rent::{AgreementModel, LoanModel, RentPenaltyModel};
use temple_admin_db::repository::{CreateBatch, PenaltyRepository, UpdateBatch};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{RentIncome, RentService, EMI_CATEGORY, PENALTY_CATEGORY, RENT_CATEGORY};
use crate::support::{add_months, clean, today};

/// Outcome of one collection event.
#[derive(Debug, Clone, Serialize)]
pub struct RentCollection {
    /// Base receipt; EMI and penalty parts carry `-EMI` / `-PEN` suffixes.
    pub receipt_number: String,
    pub transactions: Vec<TransactionModel>,
    pub agreement: AgreementModel,
    pub loan: Option<LoanModel>,
    pub penalty: Option<RentPenaltyModel>,
}

/// Parts resolved before anything is written.
struct Plan {
    agreement: AgreementModel,
    tenant_name: String,
    loan: Option<LoanModel>,
    penalty: Option<RentPenaltyModel>,
}

impl<DB: Database> RentService<DB> {
    /// Collects rent, EMI and penalty in one event under one receipt number.
    ///
    /// Parts are applied in that order without rollback: a failing part
    /// returns its error and leaves earlier parts in place.
    pub async fn collect_rent(
        &self,
        request: RentCollectionRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<RentCollection> {
        request.validate()?;
        if !(request.rent.is_due() || request.emi.is_due() || request.penalty.is_due()) {
            return Err(ApiError::field(
                "rent",
                "at least one of rent, EMI or penalty must be collected",
            ));
        }
        let parts = [
            ("rent.amount", request.rent.is_due(), request.rent.amount),
            ("emi.amount", request.emi.is_due(), request.emi.amount),
            ("penalty.amount", request.penalty.is_due(), request.penalty.amount),
        ];
        for (path, due, amount) in parts {
            if due && validate_positive(&amount).is_err() {
                return Err(ApiError::field(path, "must have at most 2 decimal places"));
            }
        }

        let plan = self.plan_collection(&request).await?;
        let payment_date = request.payment_date.unwrap_or_else(today);
        let payment_mode = clean(request.payment_mode.clone());
        let receipt = self.receipts.allocate(ReceiptKind::RentIncome).await?;
        let audit_log_id = self.repos.audit(actor, "rent.collect").await?;

        let mut outcome = RentCollection {
            receipt_number: receipt.clone(),
            transactions: Vec::new(),
            agreement: plan.agreement.clone(),
            loan: None,
            penalty: None,
        };

        let mut applied: Vec<&'static str> = Vec::new();
        let result = self
            .apply_collection(
                &request,
                &plan,
                payment_date,
                payment_mode,
                actor,
                audit_log_id,
                &mut outcome,
                &mut applied,
            )
            .await;

        if let Err(error) = result {
            if !applied.is_empty() {
                warn!(
                    receipt = %receipt,
                    applied = ?applied,
                    %error,
                    "rent collection partially applied"
                );
            }
            return Err(error);
        }

        outcome.agreement = self.repos.agreement(plan.agreement.id).await?;
        info!(receipt = %receipt, parts = ?applied, "rent collected");
        Ok(outcome)
    }

    async fn plan_collection(&self, request: &RentCollectionRequest) -> ApiResult<Plan> {
        let agreement = self.repos.agreement(request.agreement_id).await?;
        if !agreement.is_active() {
            return Err(ApiError::InvalidState(format!(
                "agreement {} is {:?}",
                agreement.id, agreement.status
            )));
        }
        let tenant = self.repos.tenant(agreement.tenant_id).await?;

        let loan = if request.emi.is_due() {
            let loan_id = agreement.active_loan_id.ok_or_else(|| {
                ApiError::InvalidState(format!("agreement {} has no active loan", agreement.id))
            })?;
            let loan = self.repos.loan(loan_id).await?;
            if !loan.is_active() {
                return Err(ApiError::InvalidState(format!(
                    "loan {} is {:?} and accepts no payments",
                    loan.id, loan.status
                )));
            }
            Some(loan)
        } else {
            None
        };

        let penalty = if request.penalty.is_due() {
            let penalty = match request.penalty.penalty_id {
                Some(id) => self.repos.penalty(id).await?,
                None => self
                    .repos
                    .penalties
                    .find_by_agreement_id(agreement.id)
                    .await?
                    .into_iter()
                    .find(|p| p.is_pending())
                    .ok_or_else(|| {
                        ApiError::InvalidState(format!(
                            "agreement {} has no pending penalty",
                            agreement.id
                        ))
                    })?,
            };
            if penalty.agreement_id != agreement.id {
                return Err(ApiError::field(
                    "penalty.penalty_id",
                    "penalty belongs to another agreement",
                ));
            }
            if !penalty.is_pending() {
                return Err(ApiError::InvalidState(format!(
                    "penalty {} is already paid",
                    penalty.id
                )));
            }
            Some(penalty)
        } else {
            None
        };

        Ok(Plan {
            agreement,
            tenant_name: tenant.name,
            loan,
            penalty,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn apply_collection(
        &self,
        request: &RentCollectionRequest,
        plan: &Plan,
        payment_date: chrono::NaiveDate,
        payment_mode: Option<String>,
        actor: Option<Uuid>,
        audit_log_id: Uuid,
        outcome: &mut RentCollection,
        applied: &mut Vec<&'static str>,
    ) -> ApiResult<()> {
        let base = outcome.receipt_number.clone();
        let income = |category: &'static str, description: String, amount, receipt: &str| {
            RentIncome {
                agreement: &plan.agreement,
                date: payment_date,
                category,
                description,
                amount,
                receipt_number: receipt,
                payment_mode: payment_mode.clone(),
                tenant_name: Some(plan.tenant_name.clone()),
                actor,
            }
            .into_model()
        };

        if request.rent.is_due() {
            let tx = income(
                RENT_CATEGORY,
                format!("Rent for {}", payment_date.format("%Y-%m")),
                request.rent.amount,
                &base,
            )?;
            let tx = self.store_income(tx, audit_log_id).await?;
            outcome.transactions.push(tx);

            let mut agreement = self.repos.agreement(plan.agreement.id).await?;
            agreement.last_payment_date = Some(payment_date);
            agreement.next_due_date = add_months(payment_date, 1)?;
            self.repos
                .agreements
                .update_batch(vec![agreement], Some(audit_log_id))
                .await?;
            applied.push("rent");
        }

        if let Some(loan) = &plan.loan {
            let mut tx = income(
                EMI_CATEGORY,
                "Loan EMI".to_string(),
                request.emi.amount,
                &format!("{base}-EMI"),
            )?;
            tx.loan_id = Some(loan.id);
            let tx = self.store_income(tx, audit_log_id).await?;
            outcome.transactions.push(tx);

            let loan = self
                .apply_loan_payment(loan.clone(), payment_date, audit_log_id)
                .await?;
            outcome.loan = Some(loan);
            applied.push("emi");
        }

        if let Some(penalty) = &plan.penalty {
            let mut tx = income(
                PENALTY_CATEGORY,
                penalty
                    .reason
                    .clone()
                    .unwrap_or_else(|| format!("Late payment penalty due {}", penalty.due_date)),
                request.penalty.amount,
                &format!("{base}-PEN"),
            )?;
            tx.penalty_id = Some(penalty.id);
            let tx = self.store_income(tx, audit_log_id).await?;
            outcome.transactions.push(tx);

            let penalty = self
                .apply_penalty_settlement(penalty.clone(), payment_date, audit_log_id)
                .await?;
            outcome.penalty = Some(penalty);
            applied.push("penalty");
        }

        Ok(())
    }

    async fn store_income(&self, tx: TransactionModel, audit_log_id: Uuid) -> ApiResult<TransactionModel> {
        let mut saved = self
            .repos
            .transactions
            .create_batch(vec![tx], Some(audit_log_id))
            .await?;
        saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("transaction was not stored".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use rust_decimal::Decimal;
    use temple_admin_api::{
        ApiError, CollectionPart, CreateLoanRequest, CreatePenaltyRequest, LoanStatus,
        PenaltyCollectionPart, PenaltyStatus, ReceiptKind, RentCollectionRequest,
        SettlePenaltyRequest, TransactionType,
    };
    use temple_admin_db::repository::LoadAll;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn test_collects_rent_emi_and_penalty_together() {
        let rent = service();
        let agreement = leased(&rent, "R-001").await;
        let loan = rent
            .create_loan(
                CreateLoanRequest {
                    agreement_id: agreement.id,
                    principal: dec(10000),
                    interest_rate: Decimal::ZERO,
                    duration_months: 2,
                    loan_date: None,
                },
                None,
            )
            .await
            .unwrap();
        let penalty = rent
            .create_penalty(
                CreatePenaltyRequest {
                    agreement_id: agreement.id,
                    due_date: date(2026, 2, 28),
                    rent_amount: None,
                    penalty_rate: dec(2),
                    reason: None,
                },
                None,
            )
            .await
            .unwrap();

        let request = RentCollectionRequest {
            agreement_id: agreement.id,
            payment_date: Some(date(2026, 3, 4)),
            payment_mode: Some("UPI".to_string()),
            rent: CollectionPart::of(dec(5000)),
            emi: CollectionPart::of(loan.emi_amount),
            penalty: PenaltyCollectionPart {
                enabled: true,
                amount: penalty.penalty_amount,
                penalty_id: None,
            },
        };
        let collection = rent.collect_rent(request, None).await.unwrap();

        let receipts: Vec<_> = collection
            .transactions
            .iter()
            .map(|tx| tx.receipt_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(receipts, vec!["RENT-000001", "RENT-000001-EMI", "RENT-000001-PEN"]);
        assert!(collection
            .transactions
            .iter()
            .all(|tx| tx.transaction_type == TransactionType::RentIncome
                && tx.agreement_id == Some(agreement.id)
                && tx.payment_mode.as_deref() == Some("UPI")));
        assert_eq!(collection.transactions[1].loan_id, Some(loan.id));
        assert_eq!(collection.transactions[2].penalty_id, Some(penalty.id));
        assert_eq!(collection.transactions[2].amount, dec(100));

        let loan = collection.loan.unwrap();
        assert_eq!(loan.outstanding_balance, dec(5000));
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(collection.penalty.unwrap().status, PenaltyStatus::Paid);
        assert_eq!(collection.agreement.next_due_date, date(2026, 4, 4));
        assert!(collection.agreement.pending_penalty_ids.is_empty());
        assert_eq!(collection.agreement.active_loan_id, Some(loan.id));
    }

    #[tokio::test]
    async fn test_nothing_enabled_is_rejected() {
        let rent = service();
        let agreement = leased(&rent, "R-002").await;
        let mut request = RentCollectionRequest::rent_only(agreement.id, dec(5000));
        request.rent.enabled = false;
        request.emi = CollectionPart {
            enabled: true,
            amount: Decimal::ZERO,
        };
        let err = assert_err!(rent.collect_rent(request, None).await);
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_emi_without_loan_writes_nothing() {
        let rent = service();
        let agreement = leased(&rent, "R-003").await;
        let mut request = RentCollectionRequest::rent_only(agreement.id, dec(5000));
        request.emi = CollectionPart::of(dec(1000));

        let err = assert_err!(rent.collect_rent(request, None).await);
        assert!(matches!(err, ApiError::InvalidState(_)));
        assert!(rent.repos.transactions.load_all().await.unwrap().is_empty());
        let unchanged = rent.get_agreement(agreement.id).await.unwrap();
        assert_eq!(unchanged.last_payment_date, None);
    }

    #[tokio::test]
    async fn test_penalty_of_other_agreement_is_refused() {
        let rent = service();
        let mine = leased(&rent, "R-004").await;
        let theirs = leased(&rent, "R-005").await;
        let foreign = rent
            .create_penalty(
                CreatePenaltyRequest {
                    agreement_id: theirs.id,
                    due_date: date(2026, 1, 1),
                    rent_amount: None,
                    penalty_rate: dec(1),
                    reason: Some("Late".to_string()),
                },
                None,
            )
            .await
            .unwrap();

        let request = RentCollectionRequest {
            agreement_id: mine.id,
            payment_date: None,
            payment_mode: None,
            rent: CollectionPart::default(),
            emi: CollectionPart::default(),
            penalty: PenaltyCollectionPart {
                enabled: true,
                amount: dec(50),
                penalty_id: Some(foreign.id),
            },
        };
        let err = assert_err!(rent.collect_rent(request, None).await);
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_settled_penalty_is_refused_before_writing() {
        let rent = service();
        let agreement = leased(&rent, "R-006").await;
        let penalty = rent
            .create_penalty(
                CreatePenaltyRequest {
                    agreement_id: agreement.id,
                    due_date: date(2026, 2, 28),
                    rent_amount: None,
                    penalty_rate: dec(2),
                    reason: None,
                },
                None,
            )
            .await
            .unwrap();
        rent.settle_penalty(penalty.id, SettlePenaltyRequest::default(), None)
            .await
            .unwrap();

        let mut request = RentCollectionRequest::rent_only(agreement.id, dec(5000));
        request.payment_date = Some(date(2026, 3, 4));
        request.penalty = PenaltyCollectionPart {
            enabled: true,
            amount: penalty.penalty_amount,
            penalty_id: Some(penalty.id),
        };
        let err = assert_err!(rent.collect_rent(request, None).await);
        assert!(matches!(err, ApiError::InvalidState(_)));

        assert!(rent.repos.transactions.load_all().await.unwrap().is_empty());
        let unchanged = rent.get_agreement(agreement.id).await.unwrap();
        assert_eq!(unchanged.last_payment_date, None);
        assert_eq!(
            rent.receipts.preview(ReceiptKind::RentIncome).await.unwrap(),
            "RENT-000001"
        );
    }

    #[tokio::test]
    async fn test_sub_paisa_amount_is_refused() {
        let rent = service();
        let agreement = leased(&rent, "R-007").await;
        let request = RentCollectionRequest::rent_only(agreement.id, Decimal::new(5_000_005, 3));
        match assert_err!(rent.collect_rent(request, None).await) {
            ApiError::ValidationError(details) => assert_eq!(details[0].path, "rent.amount"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(rent.repos.transactions.load_all().await.unwrap().is_empty());
    }
}
