//! API integration tests
//!
//! The router is driven in-process against a temporary data directory
//! holding the built-in sample records.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use medequip_server::{
    config::AppConfig,
    create_router,
    repository::{LocalStore, Repository, SettingsStore},
    services::{notifier::TelegramNotifier, Services},
    AppState,
};

struct TestApp {
    router: Router,
    _dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default();

    let local = Arc::new(
        LocalStore::open(dir.path())
            .await
            .unwrap()
            .with_sample_data(true),
    );
    let settings = SettingsStore::load(local.clone(), None).await.unwrap();
    let repository = Repository::new(local, reqwest::Client::new(), settings.clone());
    let notifier = TelegramNotifier::new(&config.notifications, settings).unwrap();
    let services = Services::new(repository, config.auth.clone(), Arc::new(notifier));
    services.users.ensure_default_admin().await.unwrap();

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };
    TestApp {
        router: create_router(state),
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder()
            .method(method)
            .uri(format!("/api/v1{}", uri));
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, token, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .json(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(&self) -> String {
        self.login("admin", "admin1234").await
    }

    async fn staff_token(&self, username: &str, department: &str) -> String {
        let (status, _) = self
            .json(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({ "username": username, "password": "secret", "department": department })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        self.login(username, "secret").await
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let (status, body) = app.json(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.json(Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "local");
}

#[tokio::test]
async fn test_login() {
    let app = spawn_app().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "admin1234" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "Admin");

    let (status, body) = app
        .json(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = spawn_app().await;

    let (status, _) = app.json(Method::GET, "/assets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.json(Method::GET, "/assets", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_asset_creation_validates_required_fields() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/assets",
            Some(&token),
            Some(json!({ "name": "Ventilator", "serialNumber": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, body) = app
        .json(
            Method::POST,
            "/assets",
            Some(&token),
            Some(json!({ "name": "Ventilator", "serialNumber": "VT-100", "department": "ICU" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().unwrap().starts_with("EQ-"));
    assert_eq!(body["status"], "Active");

    let (_, list) = app.json(Method::GET, "/assets", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_loan_and_return_flow() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, loan) = app
        .json(
            Method::POST,
            "/loans",
            Some(&token),
            Some(json!({ "assetId": "EQ-005", "borrowerName": "ICU Ward", "department": "ICU" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["status"], "Active");

    let (_, asset) = app.json(Method::GET, "/assets/EQ-005", Some(&token), None).await;
    assert_eq!(asset["status"], "Loaned");

    // Loaned asset cannot be lent twice
    let (status, _) = app
        .json(
            Method::POST,
            "/loans",
            Some(&token),
            Some(json!({ "assetId": "EQ-005", "borrowerName": "OPD" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let loan_id = loan["id"].as_str().unwrap();
    let (status, returned) = app
        .json(Method::POST, &format!("/loans/{}/return", loan_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["status"], "Returned");

    let (_, asset) = app.json(Method::GET, "/assets/EQ-005", Some(&token), None).await;
    assert_eq!(asset["status"], "Active");

    let (status, _) = app
        .json(Method::POST, &format!("/loans/{}/return", loan_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_asset_export_is_csv_with_bom() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let request = Request::builder()
        .uri("/api/v1/assets/export")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("assets_"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with('\u{feff}'));
    assert_eq!(text.lines().count(), 6);
}

#[tokio::test]
async fn test_registration_and_department_scope() {
    let app = spawn_app().await;
    let registration = json!({ "username": "icu-nurse", "password": "secret", "department": "ICU" });

    let (status, body) = app
        .json(Method::POST, "/auth/register", None, Some(registration.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "Staff");

    let (status, _) = app
        .json(Method::POST, "/auth/register", None, Some(registration))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let token = app.login("icu-nurse", "secret").await;
    let (_, assets) = app.json(Method::GET, "/assets", Some(&token), None).await;
    let ids: Vec<&str> = assets
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["EQ-002"]);

    let (status, _) = app.json(Method::GET, "/assets/EQ-001", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Staff cannot delete or change settings
    let (status, _) = app.json(Method::DELETE, "/assets/EQ-002", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.json(Method::GET, "/settings", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_settings_need_no_token() {
    let app = spawn_app().await;

    let (status, body) = app.json(Method::GET, "/settings/public", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["hospitalName"].is_string());
    assert!(body["departments"].as_array().unwrap().iter().any(|d| d == "ICU"));
    assert!(body.get("telegramBotToken").is_none());
}

#[tokio::test]
async fn test_repair_request_moves_asset_to_repair() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, record) = app
        .json(
            Method::POST,
            "/maintenance",
            Some(&token),
            Some(json!({ "mode": "repair", "assetId": "EQ-001", "description": "Screen flickers" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["type"], "CM");
    assert_eq!(record["status"], "Pending");

    let (_, asset) = app.json(Method::GET, "/assets/EQ-001", Some(&token), None).await;
    assert_eq!(asset["status"], "Under Repair");

    let uri = format!("/maintenance/{}/status", record["id"].as_str().unwrap());
    let (status, _) = app
        .json(Method::PUT, &uri, Some(&token), Some(json!({ "status": "Completed" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, asset) = app.json(Method::GET, "/assets/EQ-001", Some(&token), None).await;
    assert_eq!(asset["status"], "Active");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = spawn_app().await;

    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/assets"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_staff_cannot_download_backup() {
    let app = spawn_app().await;
    let token = app.staff_token("icu-nurse", "ICU").await;

    let (status, _) = app.json(Method::GET, "/backup", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (status, body) = app.json(Method::GET, "/backup", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assets"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_staff_assets_stay_in_their_department() {
    let app = spawn_app().await;
    let token = app.staff_token("icu-nurse", "ICU").await;

    let (status, _) = app
        .json(
            Method::POST,
            "/assets",
            Some(&token),
            Some(json!({ "name": "Ventilator", "serialNumber": "VT-1", "department": "ER" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .json(
            Method::POST,
            "/assets",
            Some(&token),
            Some(json!({ "name": "Ventilator", "serialNumber": "VT-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["department"], "ICU");

    let (status, _) = app
        .json(
            Method::PUT,
            "/assets/EQ-002",
            Some(&token),
            Some(json!({ "name": "Defibrillator", "serialNumber": "ZL-DEF-2022-889", "department": "ER" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (_, asset) = app.json(Method::GET, "/assets/EQ-002", Some(&admin), None).await;
    assert_eq!(asset["department"], "ICU");
}

#[tokio::test]
async fn test_staff_audit_reset_keeps_other_departments() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let token = app.staff_token("icu-nurse", "ICU").await;

    for asset_id in ["EQ-001", "EQ-002"] {
        let (status, _) = app
            .json(
                Method::POST,
                &format!("/audit/{}", asset_id),
                Some(&admin),
                Some(json!({ "status": "found" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = app.json(Method::DELETE, "/audit", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, report) = app.json(Method::GET, "/audit", Some(&admin), None).await;
    let status_of = |id: &str| {
        report["entries"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["asset"]["id"] == id)
            .map(|e| e["auditStatus"].clone())
            .unwrap()
    };
    assert_eq!(status_of("EQ-001"), "found");
    assert_eq!(status_of("EQ-002"), "unchecked");
}
