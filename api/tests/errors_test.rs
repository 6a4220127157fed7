//! Structured error rendering, the route fallback, panic recovery and
//! request correlation

mod common;

use std::collections::HashSet;

use actix_web::http::header::ContentType;
use actix_web::{test, web, App, HttpResponse};
use hc_api::middleware::{CatchPanic, ErrorHandlerMiddleware, RequestIdMiddleware, REQUEST_ID_HEADER};
use hc_core::Role;
use serde_json::{json, Value};

use common::{bearer, TestApp};

#[actix_web::test]
async fn test_unknown_route_is_structured_404() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), 404);
    let header = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ROUTE_NOT_FOUND");
    assert_eq!(body["request_id"], header.as_str());
}

#[actix_web::test]
async fn test_unregistered_method_falls_through_to_404() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let requests = [
        test::TestRequest::delete().uri("/ping"),
        test::TestRequest::post().uri("/drugs/forms"),
        test::TestRequest::put().uri("/doctors/status"),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "ROUTE_NOT_FOUND");
    }
}

#[actix_web::test]
async fn test_malformed_input_is_structured_400() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let broken_json = test::TestRequest::post()
        .uri("/login")
        .insert_header(ContentType::json())
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, broken_json).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["request_id"].is_string());

    let bad_uuid = test::TestRequest::get().uri("/drugs/not-a-uuid").to_request();
    let resp = test::call_service(&app, bad_uuid).await;
    assert_eq!(resp.status(), 400);

    let bad_query = test::TestRequest::get().uri("/drugs?page=first").to_request();
    let resp = test::call_service(&app, bad_query).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_invalid_fields_are_reported() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "email": "not-an-email", "password": "short", "name": "Ana" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["fields"].get("email").is_some());
    assert!(body["details"]["fields"].get("password").is_some());
}

#[actix_web::test]
async fn test_missing_resource_names_it() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{}", uuid::Uuid::new_v4()))
        .insert_header(bearer(&fixture.access_token(Role::Admin)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["details"]["resource"].is_string());
}

async fn explode() -> HttpResponse {
    panic!("handler blew up");
}

async fn fine() -> HttpResponse {
    HttpResponse::Ok().body("fine")
}

#[actix_web::test]
async fn test_panic_becomes_500_and_service_survives() {
    let app = test::init_service(
        App::new()
            .route("/explode", web::get().to(explode))
            .route("/fine", web::get().to(fine))
            .wrap(CatchPanic)
            .wrap(ErrorHandlerMiddleware)
            .wrap(RequestIdMiddleware),
    )
    .await;

    // The server renders an `Err` through its `error_response`
    let err = test::try_call_service(&app, test::TestRequest::get().uri("/explode").to_request())
        .await
        .unwrap_err();
    let resp = err.error_response();
    assert_eq!(resp.status(), 500);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert!(!body["message"].as_str().unwrap().contains("blew up"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/fine").to_request()).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_request_ids_are_unique() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let resp = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(resp.status(), 200);
        let id = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap();
        assert!(seen.insert(id));
    }
}

#[actix_web::test]
async fn test_success_body_carries_request_id() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    let header = resp.headers().get(REQUEST_ID_HEADER).cloned().unwrap();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["message"], "pong");
    assert_eq!(body["request_id"], header.to_str().unwrap());
}
