//! Authentication and role gates in front of route handlers

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::{test, App, HttpResponse};
use hc_api::middleware::{ErrorHandlerMiddleware, RequestIdMiddleware};
use hc_api::routes::{register, Access, Endpoint, RouteGroup};
use hc_core::services::{TokenService, TokenServiceConfig};
use hc_core::{Claims, Role, TokenPurpose};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use uuid::Uuid;

use common::{bearer, test_settings, TestApp};

fn tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig::from_settings(&test_settings())))
}

/// A route group whose handlers only count how often they ran
fn counting_routes(calls: Arc<AtomicUsize>) -> Vec<RouteGroup> {
    let handler = move || {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            HttpResponse::Ok().finish()
        }
    };
    vec![RouteGroup::new(
        "/gated",
        vec![
            Endpoint::get("/public", Access::Public, handler.clone()),
            Endpoint::get("/any", Access::Authenticated, handler.clone()),
            Endpoint::get("/admin", Access::Role(Role::Admin), handler),
        ],
    )]
}

macro_rules! gated_app {
    ($calls:expr, $tokens:expr) => {{
        let tokens = $tokens;
        test::init_service(
            App::new()
                .configure(|cfg| register(cfg, counting_routes($calls), &tokens))
                .wrap(ErrorHandlerMiddleware)
                .wrap(RequestIdMiddleware),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_missing_token_is_rejected_before_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = gated_app!(calls.clone(), tokens());

    for path in ["/gated/any", "/gated/admin"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(resp.status(), 401, "{path}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
        assert!(body["request_id"].is_string());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/gated/public").to_request()).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_malformed_and_foreign_tokens_are_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tokens = tokens();
    let app = gated_app!(calls.clone(), tokens.clone());

    let refresh = tokens.issue(TokenPurpose::Refresh, Uuid::new_v4(), Role::Admin).unwrap();
    let forged = encode(
        &Header::default(),
        &Claims::new(TokenPurpose::Access, Uuid::new_v4(), Role::Admin, "healthcare-test"),
        &EncodingKey::from_secret(b"not-the-access-secret"),
    )
    .unwrap();

    let headers = [
        ("Authorization", "Bearer".to_string()),
        ("Authorization", "Basic dXNlcjpwYXNz".to_string()),
        bearer("not.a.jwt"),
        bearer(&refresh),
        bearer(&forged),
    ];
    for header in headers {
        let req = test::TestRequest::get()
            .uri("/gated/any")
            .insert_header(header.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "{:?}", header.1);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_wrong_role_is_forbidden() {
    let calls = Arc::new(AtomicUsize::new(0));
    let tokens = tokens();
    let app = gated_app!(calls.clone(), tokens.clone());

    for role in [Role::User, Role::Doctor, Role::PharmacyManager] {
        let token = tokens.issue(TokenPurpose::Access, Uuid::new_v4(), role).unwrap();
        let req = test::TestRequest::get()
            .uri("/gated/admin")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403, "{role}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "FORBIDDEN");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let admin = tokens.issue(TokenPurpose::Access, Uuid::new_v4(), Role::Admin).unwrap();
    for path in ["/gated/admin", "/gated/any"] {
        let req = test::TestRequest::get()
            .uri(path)
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[actix_web::test]
async fn test_application_routes_enforce_roles() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let cases = [
        ("/users/profile", None, 401),
        ("/users/profile", Some(Role::Doctor), 403),
        ("/managers/pharmacies", Some(Role::User), 403),
        ("/admin/partners", Some(Role::PharmacyManager), 403),
        ("/doctors/profile", Some(Role::Admin), 403),
        ("/chat-rooms", None, 401),
    ];
    for (path, role, status) in cases {
        let mut req = test::TestRequest::get().uri(path);
        if let Some(role) = role {
            req = req.insert_header(bearer(&fixture.access_token(role)));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), status, "{path} as {role:?}");
    }
}
