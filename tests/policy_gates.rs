//! End-to-end tests for the view gates
//!
//! Drives the HTTP surface with real sessions to confirm the two policy
//! checks stay independent: matrix membership governs visibility (401/403),
//! the read-only derivation blocks mutations for MANAGER while leaving its
//! views intact.

use actix_web::{App, test, web};
use drydock::auth::AuthSystem;
use drydock::config::Config;
use drydock::core::models::Role;
use drydock::server::middleware::IdentityMiddleware;
use drydock::server::{AppState, routes};
use drydock::storage::StorageLayer;
use serde_json::json;
use std::sync::Arc;

const MASTER_PASSWORD: &str = "master-pass-1";

async fn test_state() -> AppState {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    config.auth.session_ttl = 3600;
    config.auth.bootstrap_password = Some(MASTER_PASSWORD.to_string());

    let storage = StorageLayer::memory();
    let auth = AuthSystem::new(&config.auth, Arc::new(storage.clone()))
        .await
        .expect("auth system");
    AppState::new(config, auth, storage)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .wrap(IdentityMiddleware)
                .configure(routes::health::configure_routes)
                .service(
                    web::scope("/api")
                        .configure(routes::auth::configure_routes)
                        .configure(routes::dashboard::configure_routes)
                        .configure(routes::vessels::configure_routes)
                        .configure(routes::work_orders::configure_routes)
                        .configure(routes::details::configure_routes)
                        .configure(routes::bastp::configure_routes)
                        .configure(routes::invoices::configure_routes)
                        .configure(routes::users::configure_routes)
                        .configure(routes::settings::configure_routes)
                        .configure(routes::reports::configure_routes)
                        .configure(routes::activity::configure_routes),
                ),
        )
        .await
    };
}

/// Mint a session directly through the auth system
async fn session_for(state: &AppState, username: &str, password: &str) -> String {
    let (_user, token) = state.auth.login(username, password).await.expect("login");
    token
}

async fn seed_user(state: &AppState, username: &str, password: &str, role: Role) {
    state
        .auth
        .create_user(
            username.to_string(),
            format!("{}@shipyard.example", username),
            password.to_string(),
            role,
        )
        .await
        .expect("seed user");
}

#[actix_web::test]
async fn health_needs_no_identity() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn login_endpoint_issues_bearer_tokens() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "master", "password": MASTER_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().expect("access token");
    assert_eq!(body["data"]["token_type"], json!("Bearer"));
    assert_eq!(body["data"]["user"]["role"], json!("MASTER"));

    // The issued token resolves an identity on a gated route
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // Wrong password is a uniform auth failure
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "master", "password": "wrong-pass-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn unresolved_identity_gets_401_everywhere() {
    let state = test_state().await;
    let app = test_app!(state);

    for uri in [
        "/api/dashboard/summary",
        "/api/vessels",
        "/api/work-orders",
        "/api/invoices",
        "/api/users",
        "/api/activity",
        "/api/export/vessels.csv",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "expected 401 for {}", uri);
    }

    // A garbage token is just as unresolved as no token
    let req = test::TestRequest::get()
        .uri("/api/vessels")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn master_reaches_every_feature() {
    let state = test_state().await;
    let app = test_app!(state);
    let token = session_for(&state, "master", MASTER_PASSWORD).await;

    for uri in [
        "/api/dashboard/summary",
        "/api/vessels",
        "/api/work-orders",
        "/api/bastp",
        "/api/invoices",
        "/api/users",
        "/api/settings",
        "/api/reports/work-orders",
        "/api/export/work-orders.csv",
        "/api/activity",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "expected success for {}", uri);
    }
}

#[actix_web::test]
async fn finance_is_scoped_to_its_features() {
    let state = test_state().await;
    seed_user(&state, "bendahara", "finance-pass-1", Role::Finance).await;
    let app = test_app!(state);
    let token = session_for(&state, "bendahara", "finance-pass-1").await;

    let allowed = ["/api/dashboard/summary", "/api/bastp", "/api/invoices"];
    for uri in allowed {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "expected success for {}", uri);
    }

    let denied = [
        "/api/work-orders",
        "/api/vessels",
        "/api/users",
        "/api/activity",
        "/api/export/vessels.csv",
    ];
    for uri in denied {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403, "expected 403 for {}", uri);
    }
}

#[actix_web::test]
async fn manager_views_everything_but_mutates_nothing() {
    let state = test_state().await;
    seed_user(&state, "direktur", "manager-pass-1", Role::Manager).await;
    let app = test_app!(state);
    let token = session_for(&state, "direktur", "manager-pass-1").await;

    // Visibility: the matrix lists MANAGER for every feature
    for uri in [
        "/api/dashboard/summary",
        "/api/vessels",
        "/api/work-orders",
        "/api/invoices",
        "/api/activity",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "expected success for {}", uri);
    }

    // Mutation: independently blocked by the read-only derivation
    let req = test::TestRequest::post()
        .uri("/api/vessels")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "name": "KM Bahari",
            "registry_number": "IMO-1234567",
            "owner": "PT Samudra",
            "vessel_type": "barge"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // The sign-in surface tells the frontend the same thing
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["read_only"], json!(true));
    assert_eq!(
        body["data"]["features"].as_array().map(|f| f.len()),
        Some(13)
    );
}

#[actix_web::test]
async fn logout_leaves_no_stale_role() {
    let state = test_state().await;
    let app = test_app!(state);
    let token = session_for(&state, "master", MASTER_PASSWORD).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn work_flow_from_vessel_to_invoice() {
    let state = test_state().await;
    let app = test_app!(state);
    let token = session_for(&state, "master", MASTER_PASSWORD).await;
    let bearer = ("Authorization", format!("Bearer {}", token));

    // Vessel
    let req = test::TestRequest::post()
        .uri("/api/vessels")
        .insert_header(bearer.clone())
        .set_json(json!({
            "name": "KM Sinar Jaya",
            "registry_number": "IMO-9876543",
            "owner": "PT Pelayaran Nusantara",
            "vessel_type": "cargo",
            "arrived_on": "2024-03-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let vessel_id = body["data"]["id"].as_str().unwrap().to_string();

    // Work order
    let req = test::TestRequest::post()
        .uri("/api/work-orders")
        .insert_header(bearer.clone())
        .set_json(json!({
            "vessel_id": vessel_id,
            "order_number": "WO-2024-001",
            "title": "Hull repair"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    // Detail line item
    let req = test::TestRequest::post()
        .uri(&format!("/api/work-orders/{}/details", order_id))
        .insert_header(bearer.clone())
        .set_json(json!({
            "description": "Replace hull plates",
            "quantity": 12.0,
            "unit": "m2"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let detail_id = body["data"]["id"].as_str().unwrap().to_string();

    // BASTP before completion is rejected
    let req = test::TestRequest::post()
        .uri("/api/bastp")
        .insert_header(bearer.clone())
        .set_json(json!({
            "work_order_id": order_id,
            "certificate_number": "BASTP-2024-001",
            "issued_on": "2024-04-01",
            "contractor_signatory": "Yard Manager",
            "owner_signatory": "Owner Rep"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Progress to 100% with evidence, then verify
    let req = test::TestRequest::post()
        .uri(&format!("/api/details/{}/progress", detail_id))
        .insert_header(bearer.clone())
        .set_json(json!({
            "report_date": "2024-03-20",
            "progress_percent": 100,
            "photo_urls": ["https://evidence.shipyard.example/p/1.jpg"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri(&format!("/api/details/{}/verify", detail_id))
        .insert_header(bearer.clone())
        .set_json(json!({ "approved": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // BASTP now succeeds
    let req = test::TestRequest::post()
        .uri("/api/bastp")
        .insert_header(bearer.clone())
        .set_json(json!({
            "work_order_id": order_id,
            "certificate_number": "BASTP-2024-001",
            "issued_on": "2024-04-01",
            "contractor_signatory": "Yard Manager",
            "owner_signatory": "Owner Rep"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let bastp_id = body["data"]["id"].as_str().unwrap().to_string();

    // One invoice per certificate
    let req = test::TestRequest::post()
        .uri("/api/invoices")
        .insert_header(bearer.clone())
        .set_json(json!({
            "bastp_id": bastp_id,
            "invoice_number": "INV-2024-001",
            "issued_on": "2024-04-05"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/invoices")
        .insert_header(bearer.clone())
        .set_json(json!({
            "bastp_id": bastp_id,
            "invoice_number": "INV-2024-002",
            "issued_on": "2024-04-06"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // The dashboard reflects the derived counts
    let req = test::TestRequest::get()
        .uri("/api/dashboard/summary")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["vessels_total"], json!(1));
    assert_eq!(body["data"]["bastp_total"], json!(1));
    assert_eq!(body["data"]["bastp_available_for_invoicing"], json!(0));
    assert_eq!(body["data"]["invoices_total"], json!(1));
}
