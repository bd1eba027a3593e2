use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::Database;
use temple_admin_api::{ApiError, ApiResult, CreateLoanRequest, LoanStatus, PayEmiRequest};
use temple_admin_db::models::rent::LoanModel;
use temple_admin_db::repository::{CreateBatch, LoadAll, LoanRepository, UpdateBatch};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::RentService;
use crate::finance::calculate_emi;
use crate::support::{add_months, today};

impl<DB: Database> RentService<DB> {
    /// Extends a loan against an Active agreement that has none running.
    pub async fn create_loan(&self, request: CreateLoanRequest, actor: Option<Uuid>) -> ApiResult<LoanModel> {
        request.validate()?;
        let mut agreement = self.repos.agreement(request.agreement_id).await?;
        if !agreement.is_active() {
            return Err(ApiError::InvalidState(format!(
                "agreement {} is not active",
                agreement.id
            )));
        }
        if let Some(loan_id) = agreement.active_loan_id {
            return Err(ApiError::InvalidState(format!(
                "agreement {} already has active loan {loan_id}",
                agreement.id
            )));
        }

        let loan_date = request.loan_date.unwrap_or_else(today);
        let emi_amount = calculate_emi(request.principal, request.interest_rate, request.duration_months)?;
        let loan = LoanModel {
            id: Uuid::new_v4(),
            tenant_id: agreement.tenant_id,
            agreement_id: agreement.id,
            principal: request.principal,
            interest_rate: request.interest_rate,
            duration_months: request.duration_months,
            emi_amount,
            outstanding_balance: request.principal,
            total_repaid: Decimal::ZERO,
            status: LoanStatus::Active,
            loan_date,
            next_emi_date: add_months(loan_date, 1)?,
            last_payment_date: None,
            created_at: Utc::now(),
            audit_log_id: None,
        };

        let audit_log_id = self.repos.audit(actor, "loan.create").await?;
        let mut saved = self.repos.loans.create_batch(vec![loan], Some(audit_log_id)).await?;
        let loan = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("loan was not stored".to_string()))?;

        agreement.active_loan_id = Some(loan.id);
        self.repos.agreements.update_batch(vec![agreement], Some(audit_log_id)).await?;

        info!(loan_id = %loan.id, principal = %loan.principal, emi = %loan.emi_amount, "loan created");
        Ok(loan)
    }

    /// All loans, or those of one agreement; newest first.
    pub async fn list_loans(&self, agreement_id: Option<Uuid>) -> ApiResult<Vec<LoanModel>> {
        let mut loans = match agreement_id {
            Some(agreement_id) => self.repos.loans.find_by_agreement_id(agreement_id).await?,
            None => self.repos.loans.load_all().await?,
        };
        loans.sort_by(|a, b| b.loan_date.cmp(&a.loan_date).then(b.created_at.cmp(&a.created_at)));
        Ok(loans)
    }

    pub async fn get_loan(&self, id: Uuid) -> ApiResult<LoanModel> {
        self.repos.loan(id).await
    }

    /// Records one EMI without a ledger entry.
    pub async fn pay_emi(&self, id: Uuid, request: PayEmiRequest, actor: Option<Uuid>) -> ApiResult<LoanModel> {
        let loan = self.repos.loan(id).await?;
        let payment_date = request.payment_date.unwrap_or_else(today);
        let audit_log_id = self.repos.audit(actor, "loan.pay").await?;
        self.apply_loan_payment(loan, payment_date, audit_log_id).await
    }

    pub async fn mark_loan_defaulted(&self, id: Uuid, actor: Option<Uuid>) -> ApiResult<LoanModel> {
        let mut loan = self.repos.loan(id).await?;
        if !loan.is_active() {
            return Err(ApiError::InvalidState(format!(
                "loan {id} is {:?}, only Active loans can default",
                loan.status
            )));
        }
        loan.status = LoanStatus::Defaulted;

        let audit_log_id = self.repos.audit(actor, "loan.default").await?;
        let loan = self.store_loan(loan, audit_log_id).await?;
        self.release_loan(&loan, audit_log_id).await?;
        info!(loan_id = %id, outstanding = %loan.outstanding_balance, "loan defaulted");
        Ok(loan)
    }

    /// Applies one EMI: the balance drops by the EMI (never below zero) and
    /// the next EMI date moves one month on. A cleared balance completes the
    /// loan and detaches it from its agreement.
    pub(crate) async fn apply_loan_payment(
        &self,
        mut loan: LoanModel,
        payment_date: NaiveDate,
        audit_log_id: Uuid,
    ) -> ApiResult<LoanModel> {
        if !loan.is_active() {
            return Err(ApiError::InvalidState(format!(
                "loan {} is {:?} and accepts no payments",
                loan.id, loan.status
            )));
        }

        let applied = loan.emi_amount.min(loan.outstanding_balance);
        loan.outstanding_balance -= applied;
        loan.total_repaid += applied;
        loan.last_payment_date = Some(payment_date);
        loan.next_emi_date = add_months(loan.next_emi_date, 1)?;
        if loan.outstanding_balance <= Decimal::ZERO {
            loan.outstanding_balance = Decimal::ZERO;
            loan.status = LoanStatus::Completed;
        }

        let loan = self.store_loan(loan, audit_log_id).await?;
        if loan.status == LoanStatus::Completed {
            self.release_loan(&loan, audit_log_id).await?;
            info!(loan_id = %loan.id, total_repaid = %loan.total_repaid, "loan completed");
        } else {
            info!(loan_id = %loan.id, outstanding = %loan.outstanding_balance, "EMI applied");
        }
        Ok(loan)
    }

    async fn store_loan(&self, loan: LoanModel, audit_log_id: Uuid) -> ApiResult<LoanModel> {
        let id = loan.id;
        let mut updated = self.repos.loans.update_batch(vec![loan], Some(audit_log_id)).await?;
        updated.pop().ok_or_else(|| ApiError::not_found("Loan", id))
    }

    /// Clears the agreement's `active_loan_id` when it still points at `loan`.
    async fn release_loan(&self, loan: &LoanModel, audit_log_id: Uuid) -> ApiResult<()> {
        let mut agreement = self.repos.agreement(loan.agreement_id).await?;
        if agreement.active_loan_id == Some(loan.id) {
            agreement.active_loan_id = None;
            self.repos.agreements.update_batch(vec![agreement], Some(audit_log_id)).await?;
        }
        Ok(())
    }
}
