use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{ok, ApiResult};
use crate::dto::profile::{DoctorQuery, DoctorStatusRequest, UpdateDoctorProfileRequest};
use crate::middleware::{AuthContext, RequestId};
use crate::state::AppState;

/// `GET /doctors`
pub async fn list_doctors(
    state: web::Data<AppState>,
    request_id: RequestId,
    query: web::Query<DoctorQuery>,
) -> ApiResult {
    let doctors = state.profiles.list_doctors(query.into_inner().into()).await?;
    ok(&request_id, doctors)
}

/// `GET /doctors/:doctor_id`
pub async fn get_doctor(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    let doctor = state.profiles.doctor(path.into_inner()).await?;
    ok(&request_id, doctor)
}

/// `GET /doctors/specializations`
pub async fn specializations(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.profiles.specializations().await?)
}

/// `GET /doctors/profile`
pub async fn get_profile(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    let profile = state.profiles.doctor_profile(auth.account_id).await?;
    ok(&request_id, profile)
}

/// `PUT /doctors/profile`
pub async fn update_profile(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<UpdateDoctorProfileRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let profile = state
        .profiles
        .update_doctor_profile(auth.account_id, body.into())
        .await?;
    ok(&request_id, profile)
}

/// `PATCH /doctors/status`
pub async fn set_status(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<DoctorStatusRequest>,
) -> ApiResult {
    let profile = state
        .profiles
        .set_doctor_online(auth.account_id, body.is_online)
        .await?;
    log::info!(
        "[{}] doctor {} is now {}",
        request_id,
        auth.account_id,
        if profile.is_online { "online" } else { "offline" }
    );
    ok(&request_id, profile)
}
