//! Patient profile and address book

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, deleted, ok, ApiResult};
use crate::dto::address::AddressRequest;
use crate::dto::profile::UpdateUserProfileRequest;
use crate::middleware::{AuthContext, RequestId};
use crate::state::AppState;

/// `GET /users/profile`
pub async fn get_profile(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    let profile = state.profiles.user_profile(auth.account_id).await?;
    ok(&request_id, profile)
}

/// `PUT /users/profile`
pub async fn update_profile(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<UpdateUserProfileRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let profile = state
        .profiles
        .update_user_profile(auth.account_id, body.into())
        .await?;
    ok(&request_id, profile)
}

/// `GET /users/addresses`
pub async fn list_addresses(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    let addresses = state.addresses.list(auth.account_id).await?;
    ok(&request_id, addresses)
}

/// `POST /users/addresses`
pub async fn create_address(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<AddressRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let address = state.addresses.create(auth.account_id, body.into()).await?;
    created(&request_id, address)
}

/// `PUT /users/addresses/:address_id`
pub async fn update_address(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<AddressRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let address = state
        .addresses
        .update(auth.account_id, path.into_inner(), body.into())
        .await?;
    ok(&request_id, address)
}

/// `DELETE /users/addresses/:address_id`
pub async fn delete_address(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    state.addresses.delete(auth.account_id, path.into_inner()).await?;
    deleted(&request_id)
}

/// `PATCH /users/addresses/:address_id/main`
pub async fn set_main_address(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let address = state.addresses.set_main(auth.account_id, path.into_inner()).await?;
    ok(&request_id, address)
}
