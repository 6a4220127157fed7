use actix_web::web;
use serde::Serialize;

use super::error::ApiError;
use super::response::{ok, ApiResult};
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct Pong {
    message: &'static str,
    uptime_secs: u64,
}

/// `GET /ping`
pub async fn ping(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(
        &request_id,
        Pong {
            message: "pong",
            uptime_secs: state.diagnostics.uptime().as_secs(),
        },
    )
}

/// Default service for any unmatched method or path
pub async fn route_not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::RouteNotFound)
}
