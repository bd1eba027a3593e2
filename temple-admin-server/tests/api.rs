use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use temple_admin_server::{router, AppState};
use temple_admin_service::ServiceSettings;

const ADMIN_PASSWORD: &str = "changeme123";

struct TestServer {
    base: String,
    http: Client,
}

impl TestServer {
    async fn start() -> Self {
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

        Self {
            base: format!("http://{address}"),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    async fn post(&self, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn get(&self, token: &str, path: &str) -> (StatusCode, Value) {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }
}

fn amount(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap()
}

fn donation(receipt: Option<&str>) -> Value {
    json!({
        "date": "2026-03-01",
        "category": "Annadan",
        "amount": "501",
        "donor_name": "Ramesh Patil",
        "receipt_number": receipt,
    })
}

#[tokio::test]
async fn test_health_and_missing_token() {
    let server = TestServer::start().await;

    let health = server.http.get(server.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let shops = server.http.get(server.url("/api/shops")).send().await.unwrap();
    assert_eq!(shops.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_me_and_logout() {
    let server = TestServer::start().await;

    let bad = server
        .http
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "admin", "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);

    let token = server.login("admin@temple.local", ADMIN_PASSWORD).await;
    let (status, me) = server.get(&token, "/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["role"], "Admin");
    assert!(me.get("password_hash").is_none());

    let (status, _) = server.post(&token, "/api/auth/logout", Value::Null).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = server.get(&token, "/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_agreement_and_rent_collection_flow() {
    let server = TestServer::start().await;
    let token = server.login("admin", ADMIN_PASSWORD).await;

    let (status, shop) = server
        .post(
            &token,
            "/api/shops",
            json!({ "shop_number": "A-010", "size": "10x12", "monthly_rent": "6000", "deposit": "18000" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, tenant) = server
        .post(
            &token,
            "/api/tenants",
            json!({ "name": "Suresh Jadhav", "phone": "9876543210", "business_type": "Grocery" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, agreement) = server
        .post(
            &token,
            "/api/agreements",
            json!({
                "shop_id": shop["id"],
                "tenant_id": tenant["id"],
                "agreement_date": "2026-03-01",
                "duration_months": 11,
                "security_deposit": "18000",
                "advance_rent": "6000",
                "agreement_type": "Commercial",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(amount(&agreement["monthly_rent"]), Decimal::new(6000, 0));

    let shop_id = shop["id"].as_str().unwrap();
    let (_, shop) = server.get(&token, &format!("/api/shops/{shop_id}")).await;
    assert_eq!(shop["status"], "Occupied");

    let (status, payments) = server.get(&token, "/api/rent-payments").await;
    assert_eq!(status, StatusCode::OK);
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(amount(&payments[0]["amount"]), Decimal::new(24000, 0));
    assert_eq!(payments[0]["receipt_number"], "RENT-000001");

    let (status, collection) = server
        .post(
            &token,
            "/api/rent-payments",
            json!({
                "agreement_id": agreement["id"],
                "payment_date": "2026-03-04",
                "rent": { "enabled": true, "amount": "6000" },
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(collection["receipt_number"], "RENT-000002");
    assert_eq!(collection["agreement"]["next_due_date"], "2026-04-04");

    // The shop is taken now.
    let (status, _) = server
        .post(
            &token,
            "/api/agreements",
            json!({
                "shop_id": shop["id"],
                "tenant_id": tenant["id"],
                "agreement_date": "2026-03-01",
                "duration_months": 11,
                "security_deposit": "0",
                "advance_rent": "0",
                "agreement_type": "Commercial",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_viewer_is_read_only() {
    let server = TestServer::start().await;
    let admin = server.login("admin", ADMIN_PASSWORD).await;

    let (status, _) = server
        .post(
            &admin,
            "/api/users",
            json!({ "username": "viewer", "email": "viewer@temple.local", "password": "viewer-pass", "role": "Viewer" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let viewer = server.login("viewer", "viewer-pass").await;
    let (status, _) = server.get(&viewer, "/api/shops").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server
        .post(
            &viewer,
            "/api/shops",
            json!({ "shop_number": "B-001", "monthly_rent": "3000", "deposit": "0" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server.get(&viewer, "/api/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_donation_conflicts_and_validation() {
    let server = TestServer::start().await;
    let token = server.login("admin", ADMIN_PASSWORD).await;

    let (status, preview) = server.get(&token, "/api/receipts/donation/preview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["receipt_number"], "DON-000001");

    let (status, created) = server.post(&token, "/api/donations", donation(None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["receipt_number"], "DON-000001");

    let (status, body) = server.post(&token, "/api/donations", donation(None)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate submission detected");

    let mut reused = donation(Some("DON-000001"));
    reused["amount"] = json!("1001");
    let (status, body) = server.post(&token, "/api/donations", reused).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Receipt number already exists");

    let mut invalid = donation(None);
    invalid["donor_name"] = json!("");
    invalid["amount"] = json!("-5");
    let (status, body) = server.post(&token, "/api/donations", invalid).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let paths: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"amount"));
    assert!(paths.contains(&"donor_name"));

    let (status, _) = server.get(&token, "/api/receipts/other/preview").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_csv_report_download_and_import() {
    let server = TestServer::start().await;
    let token = server.login("admin", ADMIN_PASSWORD).await;
    server.post(&token, "/api/donations", donation(None)).await;

    let response = server
        .http
        .get(server.url("/api/reports?kind=transactions&format=csv"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"report-transactions-"));
    assert!(disposition.ends_with(".csv\""));
    let body = response.text().await.unwrap();
    assert!(body.contains("Ramesh Patil"));

    let import = server
        .http
        .post(server.url("/api/reports/import"))
        .bearer_auth(&token)
        .body("Date,Type,Category,Description,Amount\r\n2026-03-02,Expense,Electricity,March bill,\"1,200\"\r\nbad,Expense,Electricity,x,10\r\n")
        .send()
        .await
        .unwrap();
    assert_eq!(import.status(), StatusCode::OK);
    let summary: Value = import.json().await.unwrap();
    assert_eq!(summary["imported"], 1);
    assert_eq!(summary["skipped"], 1);

    let (status, dashboard) = server.get(&token, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["summary"]["count"], 2);
}
