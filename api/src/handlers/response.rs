//! Success envelopes shared by every handler

use actix_web::HttpResponse;
use hc_shared::ApiResponse;
use serde::Serialize;

use super::error::ApiError;
use crate::middleware::RequestId;

pub type ApiResult = Result<HttpResponse, ApiError>;

/// Body of a successful deletion
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

/// 200 with `{ "data": ..., "request_id": ... }`
pub fn ok<T: Serialize>(request_id: &RequestId, data: T) -> ApiResult {
    Ok(HttpResponse::Ok().json(ApiResponse::success(data).with_request_id(request_id.as_str())))
}

/// 201 for a newly created resource
pub fn created<T: Serialize>(request_id: &RequestId, data: T) -> ApiResult {
    Ok(HttpResponse::Created().json(ApiResponse::success(data).with_request_id(request_id.as_str())))
}

pub fn deleted(request_id: &RequestId) -> ApiResult {
    ok(request_id, Deleted { deleted: true })
}
