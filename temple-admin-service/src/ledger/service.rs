use rust_decimal::Decimal;
use sqlx::Database;
use std::cmp::Reverse;
use temple_admin_api::{
    ApiError, ApiResult, ConflictKind, CreateDonationRequest, CreateExpenseRequest, ReceiptKind,
    TransactionType, UpdateTransactionRequest, VARGANI_CATEGORY,
};
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::repository::{
    CreateBatch, LoadAll, LoadPage, Page, PageRequest, TransactionRepository, UpdateBatch,
};
use temple_admin_db::utils::to_heapless;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::duplicates::DuplicateGuard;
use super::receipts::ReceiptAllocator;
use crate::repositories::Repositories;
use crate::support::clean;

/// Which ledger endpoint a request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Donation,
    /// Expense, Utilities and Salary
    Expense,
}

impl LedgerKind {
    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            LedgerKind::Donation => transaction_type == TransactionType::Donation,
            LedgerKind::Expense => matches!(
                transaction_type,
                TransactionType::Expense | TransactionType::Utilities | TransactionType::Salary
            ),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LedgerKind::Donation => "Donation",
            LedgerKind::Expense => "Expense",
        }
    }
}

/// Donation and expense recording, receipt numbering and duplicate detection.
pub struct LedgerService<DB: Database> {
    repos: Repositories<DB>,
    receipts: ReceiptAllocator<DB>,
    duplicates: DuplicateGuard,
}

impl<DB: Database> LedgerService<DB> {
    pub fn new(repos: Repositories<DB>, duplicates: DuplicateGuard) -> Self {
        let receipts = ReceiptAllocator::new(repos.receipt_counters.clone(), repos.transactions.clone());
        Self {
            repos,
            receipts,
            duplicates,
        }
    }

    pub async fn preview_receipt(&self, kind: ReceiptKind) -> ApiResult<String> {
        self.receipts.preview(kind).await
    }

    pub async fn create_donation(
        &self,
        request: CreateDonationRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<TransactionModel> {
        request.validate()?;
        let is_vargani = request.is_vargani();
        let amount = donation_amount(
            is_vargani,
            request.amount,
            request.family_members,
            request.amount_per_person,
        )?;

        let category = if is_vargani {
            VARGANI_CATEGORY.to_string()
        } else {
            request.category.trim().to_string()
        };
        let mut tx = TransactionModel::new(
            request.date,
            TransactionType::Donation,
            category,
            request.description.trim(),
            amount,
        );
        tx.sub_category = clean(request.sub_category);
        tx.payment_mode = clean(request.payment_mode);
        tx.donor_name = Some(request.donor_name.trim().to_string());
        tx.donor_contact = clean(request.donor_contact);
        tx.donor_address = clean(request.donor_address);
        if is_vargani {
            tx.family_members = request.family_members;
            tx.amount_per_person = request.amount_per_person;
        }
        tx.created_by = actor;

        let fingerprint = DuplicateGuard::fingerprint(&tx)?;
        self.duplicates.check(fingerprint)?;

        let receipt = match clean(request.receipt_number) {
            Some(requested) => {
                if self.receipts.is_taken(&requested).await? {
                    return Err(ApiError::Conflict(ConflictKind::ReceiptNumberExists));
                }
                requested
            }
            None => self.receipts.allocate(ReceiptKind::Donation).await?,
        };
        tx.receipt_number = Some(to_heapless(&receipt).map_err(|e| ApiError::field("receipt_number", e))?);

        let audit_log_id = self.repos.audit(actor, "donation.create").await?;
        let saved = self.create_one(tx, audit_log_id).await?;
        self.duplicates.remember(fingerprint).await;

        info!(receipt = %receipt, amount = %saved.amount, "donation recorded");
        Ok(saved)
    }

    pub async fn create_expense(
        &self,
        request: CreateExpenseRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<TransactionModel> {
        request.validate()?;
        if !LedgerKind::Expense.matches(request.transaction_type) {
            return Err(ApiError::field(
                "transaction_type",
                "must be one of Expense, Utilities or Salary",
            ));
        }

        let mut tx = TransactionModel::new(
            request.date,
            request.transaction_type,
            request.category.trim(),
            request.description.trim(),
            request.amount,
        );
        tx.sub_category = clean(request.sub_category);
        tx.payment_mode = clean(request.payment_mode);
        tx.payee_name = Some(request.payee_name.trim().to_string());
        tx.payee_contact = clean(request.payee_contact);
        tx.created_by = actor;

        let fingerprint = DuplicateGuard::fingerprint(&tx)?;
        self.duplicates.check(fingerprint)?;

        let audit_log_id = self.repos.audit(actor, "expense.create").await?;
        let saved = self.create_one(tx, audit_log_id).await?;
        self.duplicates.remember(fingerprint).await;

        info!(kind = %saved.transaction_type, amount = %saved.amount, "expense recorded");
        Ok(saved)
    }

    pub async fn update(
        &self,
        kind: LedgerKind,
        id: Uuid,
        request: UpdateTransactionRequest,
        actor: Option<Uuid>,
    ) -> ApiResult<TransactionModel> {
        request.validate()?;
        let mut tx = self.load_live(kind, id).await?;

        if let Some(date) = request.date {
            tx.date = date;
        }
        if let Some(category) = request.category {
            tx.category = category.trim().to_string();
        }
        if request.sub_category.is_some() {
            tx.sub_category = clean(request.sub_category);
        }
        if let Some(description) = request.description {
            tx.description = description.trim().to_string();
        }
        if request.payment_mode.is_some() {
            tx.payment_mode = clean(request.payment_mode);
        }
        match kind {
            LedgerKind::Donation => {
                if let Some(name) = request.donor_name {
                    tx.donor_name = Some(name.trim().to_string());
                }
                if request.donor_contact.is_some() {
                    tx.donor_contact = clean(request.donor_contact);
                }
                if request.donor_address.is_some() {
                    tx.donor_address = clean(request.donor_address);
                }
                if request.family_members.is_some() {
                    tx.family_members = request.family_members;
                }
                if request.amount_per_person.is_some() {
                    tx.amount_per_person = request.amount_per_person;
                }
            }
            LedgerKind::Expense => {
                if let Some(name) = request.payee_name {
                    tx.payee_name = Some(name.trim().to_string());
                }
                if request.payee_contact.is_some() {
                    tx.payee_contact = clean(request.payee_contact);
                }
            }
        }

        let is_vargani = kind == LedgerKind::Donation
            && tx.category.eq_ignore_ascii_case(VARGANI_CATEGORY);
        tx.amount = if is_vargani {
            donation_amount(true, request.amount, tx.family_members, tx.amount_per_person)?
        } else {
            request.amount.unwrap_or(tx.amount)
        };

        let audit_log_id = self.repos.audit(actor, "transaction.update").await?;
        let mut updated = self
            .repos
            .transactions
            .update_batch(vec![tx], Some(audit_log_id))
            .await?;
        updated
            .pop()
            .ok_or_else(|| ApiError::not_found(kind.label(), id))
    }

    /// Soft delete; the record stays in storage with `is_deleted` set.
    pub async fn delete(&self, kind: LedgerKind, id: Uuid, actor: Option<Uuid>) -> ApiResult<()> {
        let mut tx = self.load_live(kind, id).await?;
        tx.is_deleted = true;

        let audit_log_id = self.repos.audit(actor, "transaction.delete").await?;
        self.repos
            .transactions
            .update_batch(vec![tx], Some(audit_log_id))
            .await?;
        info!(%id, "transaction soft-deleted");
        Ok(())
    }

    /// Live records of one ledger, newest first.
    pub async fn list(&self, kind: LedgerKind, page: PageRequest) -> ApiResult<Page<TransactionModel>> {
        let mut items: Vec<_> = self
            .active_transactions()
            .await?
            .into_iter()
            .filter(|tx| kind.matches(tx.transaction_type))
            .collect();
        items.sort_by_key(|tx| Reverse((tx.date, tx.created_at)));
        Ok(page.apply(&items))
    }

    /// Every stored record including soft-deleted ones, newest first.
    pub async fn journal(&self, page: PageRequest) -> ApiResult<Page<TransactionModel>> {
        Ok(self.repos.transactions.load_page(page).await?)
    }

    /// Live rent income, optionally for one agreement, newest first.
    pub async fn list_rent_payments(&self, agreement_id: Option<Uuid>) -> ApiResult<Vec<TransactionModel>> {
        let candidates = match agreement_id {
            Some(agreement_id) => self.repos.transactions.find_by_agreement_id(agreement_id).await?,
            None => self.repos.transactions.load_all().await?,
        };
        let mut payments: Vec<_> = candidates
            .into_iter()
            .filter(|tx| !tx.is_deleted && tx.transaction_type == TransactionType::RentIncome)
            .collect();
        payments.sort_by_key(|tx| Reverse((tx.date, tx.created_at)));
        Ok(payments)
    }

    /// Every transaction not soft-deleted, in storage order.
    pub async fn active_transactions(&self) -> ApiResult<Vec<TransactionModel>> {
        let all = self.repos.transactions.load_all().await?;
        Ok(all.into_iter().filter(|tx| !tx.is_deleted).collect())
    }

    async fn load_live(&self, kind: LedgerKind, id: Uuid) -> ApiResult<TransactionModel> {
        let tx = self.repos.transaction(id).await?;
        if tx.is_deleted || !kind.matches(tx.transaction_type) {
            return Err(ApiError::not_found(kind.label(), id));
        }
        Ok(tx)
    }

    async fn create_one(&self, tx: TransactionModel, audit_log_id: Uuid) -> ApiResult<TransactionModel> {
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

/// Donation amount; for Vargani it is `family_members × amount_per_person`
/// and a supplied amount must agree with it.
pub fn donation_amount(
    is_vargani: bool,
    amount: Option<Decimal>,
    family_members: Option<i32>,
    amount_per_person: Option<Decimal>,
) -> ApiResult<Decimal> {
    if !is_vargani {
        return amount.ok_or_else(|| ApiError::field("amount", "amount is required"));
    }

    let members = family_members
        .filter(|m| *m >= 1)
        .ok_or_else(|| ApiError::field("family_members", "family members are required for Vargani"))?;
    let per_person = amount_per_person
        .filter(|p| *p > Decimal::ZERO)
        .ok_or_else(|| {
            ApiError::field("amount_per_person", "amount per person is required for Vargani")
        })?;

    let expected = Decimal::from(members) * per_person;
    match amount {
        Some(given) if given != expected => Err(ApiError::field(
            "amount",
            format!("amount must equal family members × amount per person ({expected})"),
        )),
        _ => Ok(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::Postgres;
    use std::time::Duration;

    fn service(window_secs: u64) -> LedgerService<Postgres> {
        LedgerService::new(
            Repositories::in_memory(),
            DuplicateGuard::new(Duration::from_secs(window_secs)),
        )
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn donation(amount: i64, donor: &str) -> CreateDonationRequest {
        CreateDonationRequest {
            date: date(2),
            category: "Annadan".to_string(),
            sub_category: None,
            description: String::new(),
            amount: Some(Decimal::new(amount, 0)),
            donor_name: donor.to_string(),
            donor_contact: None,
            donor_address: None,
            family_members: None,
            amount_per_person: None,
            payment_mode: Some("Cash".to_string()),
            receipt_number: None,
        }
    }

    fn expense(amount: i64, transaction_type: TransactionType) -> CreateExpenseRequest {
        CreateExpenseRequest {
            date: date(3),
            transaction_type,
            category: "Electricity".to_string(),
            sub_category: None,
            description: "MSEB bill".to_string(),
            amount: Decimal::new(amount, 0),
            payee_name: "MSEDCL".to_string(),
            payee_contact: None,
            payment_mode: None,
        }
    }

    #[tokio::test]
    async fn test_donations_get_sequential_receipts() {
        let ledger = service(30);
        let first = ledger.create_donation(donation(501, "A. Kulkarni"), None).await.unwrap();
        let second = ledger.create_donation(donation(1001, "B. Deshmukh"), None).await.unwrap();

        assert_eq!(first.receipt_str(), Some("DON-000001"));
        assert_eq!(second.receipt_str(), Some("DON-000002"));
        assert_eq!(
            ledger.preview_receipt(ReceiptKind::Donation).await.unwrap(),
            "DON-000003"
        );
    }

    #[tokio::test]
    async fn test_vargani_amount_is_derived_or_checked() {
        let ledger = service(30);
        let mut request = donation(0, "C. Pawar");
        request.category = "Vargani".to_string();
        request.amount = None;
        request.family_members = Some(4);
        request.amount_per_person = Some(Decimal::new(101, 0));

        let saved = ledger.create_donation(request.clone(), None).await.unwrap();
        assert_eq!(saved.amount, Decimal::new(404, 0));
        assert_eq!(saved.category, VARGANI_CATEGORY);

        request.donor_name = "D. Pawar".to_string();
        request.amount = Some(Decimal::new(400, 0));
        match ledger.create_donation(request, None).await {
            Err(ApiError::ValidationError(details)) => assert_eq!(details[0].path, "amount"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vargani_keeps_donor_details() {
        let ledger = service(30);
        let mut request = donation(0, "H. Gaikwad");
        request.category = "vargani".to_string();
        request.amount = None;
        request.donor_address = Some(" Ganesh Peth ".to_string());
        request.donor_contact = Some("9822000000".to_string());
        request.family_members = Some(3);
        request.amount_per_person = Some(Decimal::new(15150, 2));

        let saved = ledger.create_donation(request, None).await.unwrap();
        assert_eq!(saved.category, VARGANI_CATEGORY);
        assert_eq!(saved.amount, Decimal::new(45450, 2));
        assert_eq!(saved.donor_address.as_deref(), Some("Ganesh Peth"));
        assert_eq!(saved.family_members, Some(3));
        assert_eq!(saved.amount_per_person, Some(Decimal::new(15150, 2)));
    }

    #[tokio::test]
    async fn test_vargani_requires_members() {
        let result = donation_amount(true, None, None, Some(Decimal::new(50, 0)));
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
        assert_eq!(
            donation_amount(false, Some(Decimal::new(7, 0)), None, None).unwrap(),
            Decimal::new(7, 0)
        );
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_rejected() {
        let ledger = service(30);
        ledger.create_donation(donation(501, "A. Kulkarni"), None).await.unwrap();
        let err = ledger
            .create_donation(donation(501, "a. kulkarni "), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ConflictKind::DuplicateSubmission)));

        let relaxed = service(0);
        relaxed.create_donation(donation(501, "A. Kulkarni"), None).await.unwrap();
        relaxed.create_donation(donation(501, "A. Kulkarni"), None).await.unwrap();
    }

    #[tokio::test]
    async fn test_taken_receipt_number_conflicts_and_is_skipped() {
        let ledger = service(30);
        let mut manual = donation(251, "E. Shinde");
        manual.receipt_number = Some("DON-000001".to_string());
        ledger.create_donation(manual.clone(), None).await.unwrap();

        manual.donor_name = "F. Shinde".to_string();
        let err = ledger.create_donation(manual, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ConflictKind::ReceiptNumberExists)));

        let next = ledger.create_donation(donation(300, "G. More"), None).await.unwrap();
        assert_eq!(next.receipt_str(), Some("DON-000002"));
    }

    #[tokio::test]
    async fn test_expense_types_are_restricted() {
        let ledger = service(30);
        let saved = ledger
            .create_expense(expense(1200, TransactionType::Utilities), None)
            .await
            .unwrap();
        assert_eq!(saved.transaction_type, TransactionType::Utilities);
        assert!(saved.receipt_number.is_none());

        let err = ledger
            .create_expense(expense(10, TransactionType::Donation), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listing() {
        let ledger = service(30);
        let kept = ledger.create_donation(donation(100, "H. Jadhav"), None).await.unwrap();
        let removed = ledger.create_donation(donation(200, "I. Jadhav"), None).await.unwrap();
        ledger.create_expense(expense(50, TransactionType::Expense), None).await.unwrap();

        ledger.delete(LedgerKind::Donation, removed.id, None).await.unwrap();

        let page = ledger.list(LedgerKind::Donation, PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, kept.id);

        let again = ledger.delete(LedgerKind::Donation, removed.id, None).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));

        let journal = ledger.journal(PageRequest::default()).await.unwrap();
        assert_eq!(journal.total, 3);
    }

    #[tokio::test]
    async fn test_update_through_wrong_ledger_is_not_found() {
        let ledger = service(30);
        let saved = ledger
            .create_expense(expense(900, TransactionType::Salary), None)
            .await
            .unwrap();

        let request = UpdateTransactionRequest {
            amount: Some(Decimal::new(950, 0)),
            ..Default::default()
        };
        let wrong = ledger.update(LedgerKind::Donation, saved.id, request.clone(), None).await;
        assert!(matches!(wrong, Err(ApiError::NotFound(_))));

        let updated = ledger
            .update(LedgerKind::Expense, saved.id, request, None)
            .await
            .unwrap();
        assert_eq!(updated.amount, Decimal::new(950, 0));
        assert!(updated.audit_log_id.is_some());
    }
}
