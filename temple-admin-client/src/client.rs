use parking_lot::RwLock;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use temple_admin_api::{
    CreateAgreementRequest, CreateDonationRequest, CreateExpenseRequest, CreateLoanRequest,
    CreatePenaltyRequest, CreateShopRequest, CreateTenantRequest, CreateUserRequest, LoginRequest,
    PayEmiRequest, ReceiptKind, RentCollectionRequest, ReportQuery, SettlePenaltyRequest,
    UpdateAgreementRequest, UpdateShopRequest, UpdateTenantRequest, UpdateTransactionRequest,
    UpdateUserRequest,
};
use temple_admin_db::models::ledger::TransactionModel;
use temple_admin_db::models::rent::{
    AgreementModel, LoanModel, RentPenaltyModel, ShopModel, TenantModel,
};
use temple_admin_db::models::user::UserModel;
use temple_admin_db::repository::pagination::{Page, MAX_PAGE_SIZE};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::EntityCache;
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, Download};
use crate::retry::RetryPolicy;
use crate::session::Session;

/// Outcome of a rent collection as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct RentCollection {
    pub receipt_number: String,
    pub transactions: Vec<TransactionModel>,
    pub agreement: AgreementModel,
    pub loan: Option<LoanModel>,
    pub penalty: Option<RentPenaltyModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Deserialize)]
struct ReceiptPreview {
    receipt_number: String,
}

#[derive(Serialize)]
struct PageParams {
    page: usize,
    page_size: usize,
}

#[derive(Serialize)]
struct AgreementFilter {
    agreement_id: Uuid,
}

/// Session-scoped data layer over the HTTP API.
///
/// Every collection is fetched once per session and then kept in step with
/// the server's responses to this client's own mutations. Role checks run
/// before any request is sent.
pub struct TempleClient {
    api: ApiClient,
    session: RwLock<Option<Session>>,
    previews: RwLock<HashMap<&'static str, String>>,
    pub shops: EntityCache<ShopModel>,
    pub tenants: EntityCache<TenantModel>,
    pub agreements: EntityCache<AgreementModel>,
    pub loans: EntityCache<LoanModel>,
    pub penalties: EntityCache<RentPenaltyModel>,
    pub rent_payments: EntityCache<TransactionModel>,
    pub donations: EntityCache<TransactionModel>,
    pub expenses: EntityCache<TransactionModel>,
    pub users: EntityCache<UserModel>,
}

impl TempleClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    pub fn with_retry(base_url: impl Into<String>, retry: RetryPolicy) -> ClientResult<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, retry)?,
            session: RwLock::new(None),
            previews: RwLock::new(HashMap::new()),
            shops: EntityCache::new(),
            tenants: EntityCache::new(),
            agreements: EntityCache::new(),
            loans: EntityCache::new(),
            penalties: EntityCache::new(),
            rent_payments: EntityCache::new(),
            donations: EntityCache::new(),
            expenses: EntityCache::new(),
            users: EntityCache::new(),
        })
    }

    // --- session ---

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let session: Session = self
            .api
            .send(Method::POST, "/api/auth/login", None, &request)
            .await?;
        info!(username = %session.user.username, role = ?session.user.role, "signed in");
        self.clear_caches();
        *self.session.write() = Some(session.clone());
        Ok(session)
    }

    /// Adopts a stored session; it is checked against the server.
    pub async fn restore(&self, path: &Path) -> ClientResult<Session> {
        let stored = Session::load(path).ok_or(ClientError::NotSignedIn)?;
        let user: UserModel = self.api.get("/api/auth/me", Some(&stored.token)).await?;
        let session = Session {
            token: stored.token,
            user,
        };
        self.clear_caches();
        *self.session.write() = Some(session.clone());
        Ok(session)
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub async fn logout(&self) -> ClientResult<()> {
        let Some(session) = self.session.write().take() else {
            return Ok(());
        };
        self.clear_caches();
        self.api
            .send_empty(Method::POST, "/api/auth/logout", Some(&session.token))
            .await
    }

    fn clear_caches(&self) {
        self.shops.invalidate();
        self.tenants.invalidate();
        self.agreements.invalidate();
        self.loans.invalidate();
        self.penalties.invalidate();
        self.rent_payments.invalidate();
        self.donations.invalidate();
        self.expenses.invalidate();
        self.users.invalidate();
        self.previews.write().clear();
    }

    fn token(&self) -> ClientResult<String> {
        self.session
            .read()
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NotSignedIn)
    }

    fn writer_token(&self) -> ClientResult<String> {
        let guard = self.session.read();
        let session = guard.as_ref().ok_or(ClientError::NotSignedIn)?;
        if !session.can_write() {
            return Err(ClientError::Forbidden("read-only account".to_string()));
        }
        Ok(session.token.clone())
    }

    fn admin_token(&self) -> ClientResult<String> {
        let guard = self.session.read();
        let session = guard.as_ref().ok_or(ClientError::NotSignedIn)?;
        if !session.can_manage_users() {
            return Err(ClientError::Forbidden("only admins manage users".to_string()));
        }
        Ok(session.token.clone())
    }

    // --- generic plumbing ---

    async fn cached<T>(&self, cache: &EntityCache<T>, path: &str, refresh: bool) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned + temple_admin_db::models::Identifiable + Clone,
    {
        if !refresh {
            if let Some(items) = cache.snapshot() {
                return Ok(items);
            }
        }
        let token = self.token()?;
        let items: Vec<T> = self.api.get(path, Some(&token)).await?;
        debug!(path, count = items.len(), "collection loaded");
        cache.replace_all(items.clone());
        Ok(items)
    }

    /// Walks every page of a paginated listing.
    async fn all_pages(&self, path: &str) -> ClientResult<Vec<TransactionModel>> {
        let token = self.token()?;
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let params = PageParams {
                page,
                page_size: MAX_PAGE_SIZE,
            };
            let batch: Page<TransactionModel> =
                self.api.get_query(path, Some(&token), &params).await?;
            let more = batch.has_more() && !batch.items.is_empty();
            items.extend(batch.items);
            if !more {
                return Ok(items);
            }
            page += 1;
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let token = self.writer_token()?;
        self.api.send(Method::POST, path, Some(&token), body).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let token = self.writer_token()?;
        self.api.send(Method::PUT, path, Some(&token), body).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let token = self.writer_token()?;
        self.api.send_empty(Method::DELETE, path, Some(&token)).await
    }

    // --- shops & tenants ---

    pub async fn list_shops(&self, refresh: bool) -> ClientResult<Vec<ShopModel>> {
        self.cached(&self.shops, "/api/shops", refresh).await
    }

    pub async fn create_shop(&self, request: &CreateShopRequest) -> ClientResult<ShopModel> {
        let shop: ShopModel = self.post("/api/shops", request).await?;
        self.shops.upsert(shop.clone());
        Ok(shop)
    }

    pub async fn update_shop(&self, id: Uuid, request: &UpdateShopRequest) -> ClientResult<ShopModel> {
        let shop: ShopModel = self.put(&format!("/api/shops/{id}"), request).await?;
        self.shops.upsert(shop.clone());
        Ok(shop)
    }

    pub async fn delete_shop(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/api/shops/{id}")).await?;
        self.shops.remove(id);
        Ok(())
    }

    pub async fn list_tenants(&self, refresh: bool) -> ClientResult<Vec<TenantModel>> {
        self.cached(&self.tenants, "/api/tenants", refresh).await
    }

    pub async fn create_tenant(&self, request: &CreateTenantRequest) -> ClientResult<TenantModel> {
        let tenant: TenantModel = self.post("/api/tenants", request).await?;
        self.tenants.upsert(tenant.clone());
        Ok(tenant)
    }

    pub async fn update_tenant(&self, id: Uuid, request: &UpdateTenantRequest) -> ClientResult<TenantModel> {
        let tenant: TenantModel = self.put(&format!("/api/tenants/{id}"), request).await?;
        self.tenants.upsert(tenant.clone());
        Ok(tenant)
    }

    pub async fn delete_tenant(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/api/tenants/{id}")).await?;
        self.tenants.remove(id);
        Ok(())
    }

    // --- agreements, loans, penalties ---

    pub async fn list_agreements(&self, refresh: bool) -> ClientResult<Vec<AgreementModel>> {
        self.cached(&self.agreements, "/api/agreements", refresh).await
    }

    /// Also occupies the shop and may book upfront rent income server-side.
    pub async fn create_agreement(&self, request: &CreateAgreementRequest) -> ClientResult<AgreementModel> {
        let agreement: AgreementModel = self.post("/api/agreements", request).await?;
        self.agreements.upsert(agreement.clone());
        self.shops.invalidate();
        self.rent_payments.invalidate();
        Ok(agreement)
    }

    pub async fn update_agreement(
        &self,
        id: Uuid,
        request: &UpdateAgreementRequest,
    ) -> ClientResult<AgreementModel> {
        let agreement: AgreementModel = self.put(&format!("/api/agreements/{id}"), request).await?;
        self.agreements.upsert(agreement.clone());
        if request.status.is_some() {
            self.shops.invalidate();
        }
        Ok(agreement)
    }

    pub async fn list_loans(&self, refresh: bool) -> ClientResult<Vec<LoanModel>> {
        self.cached(&self.loans, "/api/loans", refresh).await
    }

    pub async fn create_loan(&self, request: &CreateLoanRequest) -> ClientResult<LoanModel> {
        let loan: LoanModel = self.post("/api/loans", request).await?;
        self.loans.upsert(loan.clone());
        self.agreements.invalidate();
        Ok(loan)
    }

    pub async fn pay_emi(&self, id: Uuid, request: &PayEmiRequest) -> ClientResult<LoanModel> {
        let loan: LoanModel = self.post(&format!("/api/loans/{id}/pay"), request).await?;
        self.loans.upsert(loan.clone());
        self.agreements.invalidate();
        Ok(loan)
    }

    pub async fn mark_loan_defaulted(&self, id: Uuid) -> ClientResult<LoanModel> {
        let loan: LoanModel = self.post(&format!("/api/loans/{id}/default"), &json!({})).await?;
        self.loans.upsert(loan.clone());
        self.agreements.invalidate();
        Ok(loan)
    }

    pub async fn list_penalties(&self, refresh: bool) -> ClientResult<Vec<RentPenaltyModel>> {
        self.cached(&self.penalties, "/api/penalties", refresh).await
    }

    pub async fn penalties_for(&self, agreement_id: Uuid) -> ClientResult<Vec<RentPenaltyModel>> {
        let token = self.token()?;
        self.api
            .get_query("/api/penalties", Some(&token), &AgreementFilter { agreement_id })
            .await
    }

    pub async fn create_penalty(&self, request: &CreatePenaltyRequest) -> ClientResult<RentPenaltyModel> {
        let penalty: RentPenaltyModel = self.post("/api/penalties", request).await?;
        self.penalties.upsert(penalty.clone());
        self.agreements.invalidate();
        Ok(penalty)
    }

    pub async fn settle_penalty(
        &self,
        id: Uuid,
        request: &SettlePenaltyRequest,
    ) -> ClientResult<RentPenaltyModel> {
        let penalty: RentPenaltyModel = self.post(&format!("/api/penalties/{id}/settle"), request).await?;
        self.penalties.upsert(penalty.clone());
        self.agreements.invalidate();
        Ok(penalty)
    }

    // --- rent collection ---

    pub async fn list_rent_payments(&self, refresh: bool) -> ClientResult<Vec<TransactionModel>> {
        self.cached(&self.rent_payments, "/api/rent-payments", refresh).await
    }

    /// Reconciles every record the collection touched.
    pub async fn collect_rent(&self, request: &RentCollectionRequest) -> ClientResult<RentCollection> {
        let collection: RentCollection = self.post("/api/rent-payments", request).await?;
        for tx in &collection.transactions {
            self.rent_payments.upsert(tx.clone());
        }
        if self.agreements.is_loaded() {
            self.agreements.upsert(collection.agreement.clone());
        } else if let Err(error) = self.list_agreements(true).await {
            warn!(%error, "agreements not refreshed after collection");
        }
        if let Some(loan) = &collection.loan {
            self.loans.upsert(loan.clone());
        }
        if let Some(penalty) = &collection.penalty {
            self.penalties.upsert(penalty.clone());
        }
        self.previews.write().remove(ReceiptKind::RentIncome.prefix());
        Ok(collection)
    }

    // --- donations & expenses ---

    /// Next receipt number the server would issue.
    pub async fn preview_receipt(&self, kind: ReceiptKind) -> ClientResult<String> {
        let token = self.token()?;
        let slug = match kind {
            ReceiptKind::Donation => "donation",
            ReceiptKind::RentIncome => "rent",
        };
        let preview: ReceiptPreview = self
            .api
            .get(&format!("/api/receipts/{slug}/preview"), Some(&token))
            .await?;
        self.previews
            .write()
            .insert(kind.prefix(), preview.receipt_number.clone());
        Ok(preview.receipt_number)
    }

    /// Last preview fetched for `kind` in this session.
    pub fn last_preview(&self, kind: ReceiptKind) -> Option<String> {
        self.previews.read().get(kind.prefix()).cloned()
    }

    pub async fn list_donations(&self, refresh: bool) -> ClientResult<Vec<TransactionModel>> {
        if !refresh {
            if let Some(items) = self.donations.snapshot() {
                return Ok(items);
            }
        }
        let items = self.all_pages("/api/donations").await?;
        self.donations.replace_all(items.clone());
        Ok(items)
    }

    /// A 409 comes back with a fresh receipt preview attached so the caller
    /// can resubmit.
    pub async fn create_donation(&self, request: &CreateDonationRequest) -> ClientResult<TransactionModel> {
        match self.post::<_, TransactionModel>("/api/donations", request).await {
            Ok(donation) => {
                self.donations.upsert(donation.clone());
                self.previews.write().remove(ReceiptKind::Donation.prefix());
                Ok(donation)
            }
            Err(ClientError::Conflict { kind, .. }) => {
                let next_receipt = self.preview_receipt(ReceiptKind::Donation).await.ok();
                info!(%kind, ?next_receipt, "donation conflict, receipt preview refreshed");
                Err(ClientError::Conflict { kind, next_receipt })
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update_donation(
        &self,
        id: Uuid,
        request: &UpdateTransactionRequest,
    ) -> ClientResult<TransactionModel> {
        let donation: TransactionModel = self.put(&format!("/api/donations/{id}"), request).await?;
        self.donations.upsert(donation.clone());
        Ok(donation)
    }

    pub async fn delete_donation(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/api/donations/{id}")).await?;
        self.donations.remove(id);
        Ok(())
    }

    pub async fn list_expenses(&self, refresh: bool) -> ClientResult<Vec<TransactionModel>> {
        if !refresh {
            if let Some(items) = self.expenses.snapshot() {
                return Ok(items);
            }
        }
        let items = self.all_pages("/api/expenses").await?;
        self.expenses.replace_all(items.clone());
        Ok(items)
    }

    pub async fn create_expense(&self, request: &CreateExpenseRequest) -> ClientResult<TransactionModel> {
        let expense: TransactionModel = self.post("/api/expenses", request).await?;
        self.expenses.upsert(expense.clone());
        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        id: Uuid,
        request: &UpdateTransactionRequest,
    ) -> ClientResult<TransactionModel> {
        let expense: TransactionModel = self.put(&format!("/api/expenses/{id}"), request).await?;
        self.expenses.upsert(expense.clone());
        Ok(expense)
    }

    pub async fn delete_expense(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("/api/expenses/{id}")).await?;
        self.expenses.remove(id);
        Ok(())
    }

    // --- users ---

    pub async fn list_users(&self, refresh: bool) -> ClientResult<Vec<UserModel>> {
        self.admin_token()?;
        self.cached(&self.users, "/api/users", refresh).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> ClientResult<UserModel> {
        let token = self.admin_token()?;
        let user: UserModel = self.api.send(Method::POST, "/api/users", Some(&token), request).await?;
        self.users.upsert(user.clone());
        Ok(user)
    }

    pub async fn update_user(&self, id: Uuid, request: &UpdateUserRequest) -> ClientResult<UserModel> {
        let token = self.admin_token()?;
        let user: UserModel = self
            .api
            .send(Method::PUT, &format!("/api/users/{id}"), Some(&token), request)
            .await?;
        self.users.upsert(user.clone());
        Ok(user)
    }

    pub async fn delete_user(&self, id: Uuid) -> ClientResult<()> {
        let token = self.admin_token()?;
        self.api
            .send_empty(Method::DELETE, &format!("/api/users/{id}"), Some(&token))
            .await?;
        self.users.remove(id);
        Ok(())
    }

    // --- reports ---

    /// JSON form of a report; `query.format` is ignored.
    pub async fn report(&self, query: &ReportQuery) -> ClientResult<Value> {
        let token = self.token()?;
        let mut query = query.clone();
        query.format = temple_admin_api::ReportFormat::Json;
        self.api.get_query("/api/reports", Some(&token), &query).await
    }

    /// CSV, HTML or PDF export as a named file.
    pub async fn export_report(&self, query: &ReportQuery) -> ClientResult<Download> {
        let token = self.token()?;
        self.api.download("/api/reports", Some(&token), query).await
    }

    pub async fn import_csv(&self, text: String) -> ClientResult<ImportSummary> {
        let token = self.writer_token()?;
        let summary: ImportSummary = self.api.send_text("/api/reports/import", Some(&token), text).await?;
        if summary.imported > 0 {
            self.donations.invalidate();
            self.expenses.invalidate();
            self.rent_payments.invalidate();
        }
        Ok(summary)
    }

    pub async fn dashboard(&self) -> ClientResult<Value> {
        let token = self.token()?;
        self.api.get("/api/dashboard", Some(&token)).await
    }
}
