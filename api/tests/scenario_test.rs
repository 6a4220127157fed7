//! End-to-end flows through the full application

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }};
}

macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(json!({ "email": $email, "password": $password }))
        );
        assert_eq!(status, StatusCode::OK, "login {}: {body}", $email);
        body["data"]["access_token"].as_str().unwrap().to_string()
    }};
}

fn id_of(body: &Value) -> String {
    body["data"]["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn test_register_verify_login_and_profile() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "Ana@Example.com",
            "password": "correct-horse",
            "name": "Ana"
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "ana@example.com");
    assert_eq!(body["data"]["is_verified"], false);

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "ana@example.com",
            "password": "another-password",
            "name": "Ana Again"
        }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let token = fixture.mailer.verification_token("ana@example.com").unwrap();
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/verify-email")
            .set_json(json!({ "token": token }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_verified"], true);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "ana@example.com", "password": "wrong-password" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    let access = login!(app, "ana@example.com", "correct-horse");
    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/users/profile")
            .insert_header(bearer(&access))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ana");

    let (status, _) = call!(app, test::TestRequest::get().uri("/users/profile"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = call!(app, test::TestRequest::get().uri("/doctors/specializations"));
    let specialization = body["data"][0]["id"].as_str().unwrap().to_string();
    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/doctors/register").set_json(json!({
            "email": "dr.budi@example.com",
            "password": "stethoscope",
            "name": "Budi",
            "specialization_id": specialization,
            "license_number": "STR-001"
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let doctor = login!(app, "dr.budi@example.com", "stethoscope");
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/users/profile")
            .insert_header(bearer(&doctor))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    call!(
        app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "citra@example.com",
            "password": "first-password",
            "name": "Citra"
        }))
    );

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/forgot-password")
            .set_json(json!({ "email": "nobody@example.com" }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/forgot-password")
            .set_json(json!({ "email": "citra@example.com" }))
    );
    assert_eq!(status, StatusCode::OK);
    let token = fixture.mailer.reset_token("citra@example.com").unwrap();

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/reset-password")
            .set_json(json!({ "token": token, "password": "second-password" }))
    );
    assert_eq!(status, StatusCode::OK);

    login!(app, "citra@example.com", "second-password");
}

#[actix_web::test]
async fn test_checkout_and_cancel_move_stock() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;
    let admin = login!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/admin/partners")
            .insert_header(bearer(&admin))
            .set_json(json!({
                "email": "manager@apotek.example",
                "password": "manager-password",
                "company_name": "Apotek Sehat",
                "phone": "0211234567",
                "address": "Jl. Sudirman 1"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let manager = login!(app, "manager@apotek.example", "manager-password");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/managers/pharmacies")
            .insert_header(bearer(&manager))
            .set_json(json!({
                "name": "Apotek Sehat Menteng",
                "address": "Jl. Menteng 2",
                "city": "Jakarta",
                "pharmacist_name": "Dewi",
                "license_number": "SIPA-77",
                "operational_hours": "08:00-21:00"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_active"], true);
    let pharmacy = id_of(&body);

    let (_, categories) = call!(app, test::TestRequest::get().uri("/categories"));
    let (_, forms) = call!(app, test::TestRequest::get().uri("/drugs/forms"));
    let (_, classes) = call!(app, test::TestRequest::get().uri("/drugs/classifications"));
    let over_the_counter = classes["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["requires_prescription"] == false)
        .unwrap()["id"]
        .clone();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/admin/drugs")
            .insert_header(bearer(&admin))
            .set_json(json!({
                "name": "Paracetamol 500",
                "generic_name": "Paracetamol",
                "manufacturer": "Kimia Farma",
                "category_id": categories["data"][0]["id"],
                "form_id": forms["data"][0]["id"],
                "classification_id": over_the_counter,
                "unit_in_pack": "strip of 10 tablets",
                "weight_grams": 20
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let drug = id_of(&body);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/managers/pharmacies/{pharmacy}/drugs"))
            .insert_header(bearer(&manager))
            .set_json(json!({ "drug_id": drug, "price": 15000, "stock": 10 }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let offer = id_of(&body);

    let (_, body) = call!(app, test::TestRequest::get().uri(&format!("/drugs/{drug}/pharmacies")));
    assert_eq!(body["data"][0]["pharmacy_drug_id"], offer.as_str());

    call!(
        app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "dian@example.com",
            "password": "dian-password",
            "name": "Dian"
        }))
    );
    let user = login!(app, "dian@example.com", "dian-password");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/users/addresses")
            .insert_header(bearer(&user))
            .set_json(json!({
                "label": "Home",
                "recipient": "Dian",
                "phone": "0812345678",
                "street": "Jl. Kebon Sirih 3",
                "city": "Jakarta",
                "province": "DKI Jakarta",
                "postal_code": "10340"
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_main"], true);
    let address = id_of(&body);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/cart")
            .insert_header(bearer(&user))
            .set_json(json!({ "pharmacy_drug_id": offer, "quantity": 3 }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call!(app, test::TestRequest::get().uri("/cart").insert_header(bearer(&user)));
    assert_eq!(body["data"]["total"], 45000);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/orders")
            .insert_header(bearer(&user))
            .set_json(json!({ "address_id": address }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "waiting_payment");
    assert_eq!(body["data"]["pharmacy_orders"].as_array().unwrap().len(), 1);
    let order = id_of(&body);

    let stock = |body: &Value| body["data"][0]["stock"].as_u64().unwrap();
    let inventory = test::TestRequest::get()
        .uri(&format!("/managers/pharmacies/{pharmacy}/drugs"))
        .insert_header(bearer(&manager));
    let (_, body) = call!(app, inventory);
    assert_eq!(stock(&body), 7);

    let (_, body) = call!(app, test::TestRequest::get().uri("/cart").insert_header(bearer(&user)));
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);

    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/orders/{order}/cancel"))
            .insert_header(bearer(&user))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    let inventory = test::TestRequest::get()
        .uri(&format!("/managers/pharmacies/{pharmacy}/drugs"))
        .insert_header(bearer(&manager));
    let (_, body) = call!(app, inventory);
    assert_eq!(stock(&body), 10);

    let (status, _) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/orders/{order}/cancel"))
            .insert_header(bearer(&user))
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_consultation_long_poll() {
    let fixture = TestApp::new().await;
    let app = test::init_service(hc_api::create_app(fixture.state.clone())).await;

    let (_, body) = call!(app, test::TestRequest::get().uri("/doctors/specializations"));
    let specialization = body["data"][0]["id"].clone();
    call!(
        app,
        test::TestRequest::post().uri("/doctors/register").set_json(json!({
            "email": "dr.eka@example.com",
            "password": "doctor-password",
            "name": "Eka",
            "specialization_id": specialization,
            "license_number": "STR-002"
        }))
    );
    call!(
        app,
        test::TestRequest::post().uri("/users/register").set_json(json!({
            "email": "fajar@example.com",
            "password": "patient-password",
            "name": "Fajar"
        }))
    );
    let doctor = login!(app, "dr.eka@example.com", "doctor-password");
    let user = login!(app, "fajar@example.com", "patient-password");

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/doctors/profile")
            .insert_header(bearer(&doctor))
    );
    let doctor_id = body["data"]["account_id"].clone();

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/chat-rooms")
            .insert_header(bearer(&user))
            .set_json(json!({ "doctor_id": doctor_id }))
    );
    assert_eq!(status, StatusCode::CONFLICT, "offline doctors cannot be consulted");

    let (status, _) = call!(
        app,
        test::TestRequest::patch()
            .uri("/doctors/status")
            .insert_header(bearer(&doctor))
            .set_json(json!({ "is_online": true }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/chat-rooms")
            .insert_header(bearer(&user))
            .set_json(json!({ "doctor_id": doctor_id }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "waiting");
    let room = id_of(&body);

    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri("/chat-rooms")
            .insert_header(bearer(&doctor))
            .set_json(json!({ "room_id": room }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "active");

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/chat-rooms/chats/{room}"))
            .insert_header(bearer(&user))
            .set_json(json!({ "content": "I have had a fever since yesterday" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/chat-rooms/chats/{room}?after=0&wait=5"))
            .insert_header(bearer(&doctor))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["last_seq"], 1);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/chat-rooms/chats/{room}?after=1&wait=0"))
            .insert_header(bearer(&doctor))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["messages"].as_array().unwrap().is_empty());

    let listen = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/chat-rooms/chats/{room}?after=1&wait=5"))
            .insert_header(bearer(&doctor))
            .to_request(),
    );
    let post = async {
        actix_web::rt::time::sleep(std::time::Duration::from_millis(50)).await;
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/chat-rooms/chats/{room}"))
                .insert_header(bearer(&user))
                .set_json(json!({ "content": "and a headache" }))
                .to_request(),
        )
        .await
    };
    let (listened, posted) = futures_util::join!(listen, post);
    assert_eq!(posted.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(listened).await;
    assert_eq!(body["data"]["messages"][0]["content"], "and a headache");

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/chat-rooms")
            .insert_header(bearer(&fixture.access_token(hc_core::Role::User)))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/chat-rooms/{room}/close"))
            .insert_header(bearer(&user))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "closed");
}
