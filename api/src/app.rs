//! Application factory
//!
//! Builds the actix `App` from a shared [`AppState`]: extractor error
//! configuration, the global middleware stack and the route table.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, Error};

use crate::handlers::{system, ApiError};
use crate::middleware::{create_cors, CatchPanic, ErrorHandlerMiddleware, InFlight, RequestIdMiddleware};
use crate::routes;
use crate::state::AppState;

/// Access log line, ending with the correlation id set by the request-id layer
const LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms req_id=%{x-request-id}o"#;

/// Malformed bodies become structured 400s
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Create the application. Middleware runs outermost first as
/// `Logger`, `RequestId`, `ErrorHandler`, `CatchPanic`, `Cors`, `InFlight`.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let tokens = Arc::clone(&state.tokens);
    let requests = Arc::clone(&state.diagnostics.requests);

    // `wrap` registers from the inside out
    App::new()
        .app_data(state)
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .configure(|cfg| routes::configure(cfg, &tokens))
        .default_service(web::route().to(system::route_not_found))
        .wrap(InFlight::new(requests))
        .wrap(create_cors())
        .wrap(CatchPanic)
        .wrap(ErrorHandlerMiddleware)
        .wrap(RequestIdMiddleware)
        .wrap(Logger::new(LOG_FORMAT))
}
