//! Cross-origin headers and request correlation through the assembled
//! application, on successes and on gate rejections alike

mod common;

use actix_web::http::header;
use actix_web::test;
use hc_api::middleware::REQUEST_ID_HEADER;
use hc_core::Role;
use serde_json::Value;

use common::{bearer, TestApp};

const ORIGIN: &str = "http://localhost:3000";

fn header_str<B>(res: &actix_web::dev::ServiceResponse<B>, name: impl header::AsHeaderName) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

#[actix_web::test]
async fn test_ping_carries_cors_and_request_id() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/ping")
        .insert_header((header::ORIGIN, ORIGIN))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), 200);
    assert_eq!(header_str(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(), Some(ORIGIN));
    assert_eq!(
        header_str(&res, header::ACCESS_CONTROL_ALLOW_CREDENTIALS).as_deref(),
        Some("true")
    );
    let request_id = header_str(&res, REQUEST_ID_HEADER).unwrap();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["message"], "pong");
    assert_eq!(body["request_id"], request_id.as_str());
}

#[actix_web::test]
async fn test_gate_rejections_stay_readable_cross_origin() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let cases = [
        (None, 401, "UNAUTHORIZED"),
        (Some(Role::Doctor), 403, "FORBIDDEN"),
    ];
    for (role, status, code) in cases {
        let mut req = test::TestRequest::get()
            .uri("/users/profile")
            .insert_header((header::ORIGIN, ORIGIN));
        if let Some(role) = role {
            req = req.insert_header(bearer(&fixture.access_token(role)));
        }
        let res = test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), status);
        assert_eq!(
            header_str(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(),
            Some(ORIGIN),
            "{status}"
        );
        assert_eq!(
            header_str(&res, header::ACCESS_CONTROL_ALLOW_CREDENTIALS).as_deref(),
            Some("true")
        );
        assert_eq!(
            header_str(&res, header::CONTENT_TYPE).as_deref(),
            Some("application/json")
        );
        let request_id = header_str(&res, REQUEST_ID_HEADER).unwrap();
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], code);
        assert_eq!(body["request_id"], request_id.as_str());
    }
}

#[actix_web::test]
async fn test_fallback_and_bad_input_carry_cors() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    for (uri, status) in [("/nope", 404), ("/drugs/not-a-uuid", 400)] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((header::ORIGIN, ORIGIN))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), status, "{uri}");
        assert_eq!(header_str(&res, header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(), Some(ORIGIN));
        assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    }
}
