//! Graceful shutdown against a real listener

mod common;

use std::net::TcpListener;
use std::time::Duration;

use actix_web::http::KeepAlive;
use actix_web::rt::time::sleep;
use actix_web::{web, App, HttpResponse, HttpServer};
use hc_api::lifecycle::{run_until_shutdown, serve, ShutdownOutcome};

use common::TestApp;

fn local_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().pool_max_idle_per_host(0).build().unwrap()
}

/// Server whose only route answers after `delay`
fn slow_server(listener: TcpListener, delay: Duration, shutdown_timeout: u64) -> actix_web::dev::Server {
    HttpServer::new(move || {
        App::new().route(
            "/slow",
            web::get().to(move || async move {
                sleep(delay).await;
                HttpResponse::Ok().body("done")
            }),
        )
    })
    .workers(1)
    .keep_alive(KeepAlive::Disabled)
    .disable_signals()
    .shutdown_timeout(shutdown_timeout)
    .listen(listener)
    .unwrap()
    .run()
}

#[actix_web::test]
async fn test_in_flight_request_drains() {
    let (listener, url) = local_listener();
    let server = slow_server(listener, Duration::from_millis(300), 5);

    let request = actix_web::rt::spawn(async move { client().get(format!("{url}/slow")).send().await });
    let outcome = run_until_shutdown(server, Duration::from_secs(5), sleep(Duration::from_millis(100)))
        .await
        .unwrap();

    assert_eq!(outcome, ShutdownOutcome::Drained);
    let response = request.await.unwrap().unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "done");
}

#[actix_web::test]
async fn test_stuck_request_times_out() {
    let (listener, url) = local_listener();
    let server = slow_server(listener, Duration::from_secs(30), 2);

    let request = actix_web::rt::spawn(async move { client().get(format!("{url}/slow")).send().await });
    let outcome = run_until_shutdown(server, Duration::from_secs(1), sleep(Duration::from_millis(100)))
        .await
        .unwrap();

    assert_eq!(outcome, ShutdownOutcome::TimedOut);
    assert!(request.await.unwrap().is_err());
}

#[actix_web::test]
async fn test_application_server_serves_then_stops() {
    let fixture = TestApp::new().await;
    let (listener, url) = local_listener();
    let server = serve(fixture.state.clone(), listener, Duration::from_secs(1)).unwrap();

    let shutdown = async move {
        let response = client().get(format!("{url}/ping")).send().await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("x-request-id"));
    };
    let outcome = run_until_shutdown(server, Duration::from_secs(5), shutdown).await.unwrap();
    assert_eq!(outcome, ShutdownOutcome::Drained);
}
