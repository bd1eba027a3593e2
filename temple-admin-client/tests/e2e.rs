use chrono::NaiveDate;
use rust_decimal::Decimal;
use temple_admin_api::{
    AgreementType, ConflictKind, CreateAgreementRequest, CreateDonationRequest, CreateShopRequest,
    CreateTenantRequest, CreateUserRequest, ReceiptKind, RentCollectionRequest, ShopStatus,
    UserRole,
};
use temple_admin_client::{ClientError, RetryPolicy, Session, TempleClient};
use temple_admin_server::{router, AppState};
use temple_admin_service::ServiceSettings;
use tokio_test::{assert_err, assert_ok};

const ADMIN_PASSWORD: &str = "changeme123";

async fn start_server() -> String {
    let settings = ServiceSettings {
        bcrypt_cost: 4,
        ..ServiceSettings::default()
    };
    let state = AppState::in_memory(&settings);
    state
        .services
        .users
        .bootstrap_admin("admin", "admin@temple.local", ADMIN_PASSWORD)
        .await
        .unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{address}")
}

async fn signed_in(base: &str) -> TempleClient {
    let client = TempleClient::with_retry(base, RetryPolicy::none()).unwrap();
    client.login("admin", ADMIN_PASSWORD).await.unwrap();
    client
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn donation() -> CreateDonationRequest {
    CreateDonationRequest {
        date: date(2026, 3, 1),
        category: "Annadan".to_string(),
        sub_category: None,
        description: String::new(),
        amount: Some(Decimal::new(501, 0)),
        donor_name: "Ramesh Patil".to_string(),
        donor_contact: None,
        donor_address: None,
        family_members: None,
        amount_per_person: None,
        payment_mode: Some("Cash".to_string()),
        receipt_number: None,
    }
}

#[tokio::test]
async fn test_rent_flow_reconciles_local_collections() {
    let base = start_server().await;
    let client = signed_in(&base).await;

    let shop = client
        .create_shop(&CreateShopRequest {
            shop_number: "A-010".to_string(),
            size: "10x12".to_string(),
            monthly_rent: Decimal::new(6000, 0),
            deposit: Decimal::new(18000, 0),
            description: None,
        })
        .await
        .unwrap();
    let tenant = client
        .create_tenant(&CreateTenantRequest {
            name: "Suresh Jadhav".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            address: String::new(),
            business_type: "Grocery".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(client.list_shops(false).await.unwrap().len(), 1);
    let agreement = client
        .create_agreement(&CreateAgreementRequest {
            shop_id: shop.id,
            tenant_id: tenant.id,
            agreement_date: date(2026, 3, 1),
            duration_months: 11,
            monthly_rent: None,
            security_deposit: Decimal::new(18000, 0),
            advance_rent: Decimal::new(6000, 0),
            agreement_type: AgreementType::Commercial,
        })
        .await
        .unwrap();

    // The agreement invalidated the cached shops.
    let shops = client.list_shops(false).await.unwrap();
    assert_eq!(shops[0].status, ShopStatus::Occupied);

    let payments = client.list_rent_payments(false).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, Decimal::new(24000, 0));

    let mut request = RentCollectionRequest::rent_only(agreement.id, Decimal::new(6000, 0));
    request.payment_date = Some(date(2026, 3, 4));
    let collection = client.collect_rent(&request).await.unwrap();
    assert_eq!(collection.receipt_number, "RENT-000002");

    let cached = client.rent_payments.snapshot().unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].receipt_str(), Some("RENT-000002"));
    // agreements were never listed, so the collection fetched them
    assert!(client.agreements.is_loaded());
    assert_eq!(
        client.agreements.get(agreement.id).unwrap().next_due_date,
        date(2026, 4, 4)
    );
}

#[tokio::test]
async fn test_conflict_refreshes_receipt_preview() {
    let base = start_server().await;
    let client = signed_in(&base).await;

    assert_eq!(client.preview_receipt(ReceiptKind::Donation).await.unwrap(), "DON-000001");
    let first = client.create_donation(&donation()).await.unwrap();
    assert_eq!(first.receipt_str(), Some("DON-000001"));

    match client.create_donation(&donation()).await {
        Err(ClientError::Conflict { kind, next_receipt }) => {
            assert_eq!(kind, ConflictKind::DuplicateSubmission);
            assert_eq!(next_receipt.as_deref(), Some("DON-000002"));
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
    assert_eq!(
        client.last_preview(ReceiptKind::Donation).as_deref(),
        Some("DON-000002")
    );

    let mut reused = donation();
    reused.amount = Some(Decimal::new(1001, 0));
    reused.receipt_number = Some("DON-000001".to_string());
    let error = client.create_donation(&reused).await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::Conflict {
            kind: ConflictKind::ReceiptNumberExists,
            ..
        }
    ));

    let mut invalid = donation();
    invalid.donor_name = String::new();
    match client.create_donation(&invalid).await {
        Err(ClientError::Validation(details)) => {
            assert!(details.iter().any(|d| d.path == "donor_name"));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_viewer_writes_are_blocked_before_sending() {
    let base = start_server().await;
    let admin = signed_in(&base).await;
    admin
        .create_user(&CreateUserRequest {
            username: "viewer".to_string(),
            email: "viewer@temple.local".to_string(),
            password: "viewer-pass".to_string(),
            role: UserRole::Viewer,
            status: None,
        })
        .await
        .unwrap();

    let viewer = TempleClient::with_retry(&base, RetryPolicy::none()).unwrap();
    viewer.login("viewer", "viewer-pass").await.unwrap();
    assert!(viewer.list_donations(false).await.unwrap().is_empty());
    assert!(matches!(
        viewer.create_donation(&donation()).await,
        Err(ClientError::Forbidden(_))
    ));
    assert!(matches!(viewer.list_users(false).await, Err(ClientError::Forbidden(_))));
}

#[tokio::test]
async fn test_session_survives_restart_until_logout() {
    let base = start_server().await;
    let client = signed_in(&base).await;
    let path = std::env::temp_dir().join(format!("temple-admin-e2e-{}.json", uuid::Uuid::new_v4()));
    client.session().unwrap().save(&path).unwrap();

    let restarted = TempleClient::with_retry(&base, RetryPolicy::none()).unwrap();
    let session: Session = assert_ok!(restarted.restore(&path).await);
    assert_eq!(session.user.username.as_str(), "admin");

    restarted.logout().await.unwrap();
    assert!(restarted.session().is_none());
    let expired = assert_err!(restarted.restore(&path).await);
    assert!(matches!(expired, ClientError::Unauthorized(_)));
    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_unsigned_client_is_rejected_locally() {
    let base = start_server().await;
    let client = TempleClient::new(&base).unwrap();
    assert!(matches!(client.list_shops(false).await, Err(ClientError::NotSignedIn)));
}
