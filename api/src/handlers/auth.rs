//! Public account endpoints: registration, login, token refresh and the
//! e-mail driven verification and password reset flows.

use actix_web::web;
use validator::Validate;

use super::response::{created, ok, ApiResult};
use crate::dto::auth::{
    AccountResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RefreshTokenRequest,
    RegisterDoctorRequest, RegisterUserRequest, ResetPasswordRequest, VerifyEmailRequest,
};
use crate::middleware::RequestId;
use crate::state::AppState;

/// `POST /users/register`
pub async fn register_user(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<RegisterUserRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;

    let account = state.auth.register_user(body.into()).await?;
    log::info!("[{}] user registered: {}", request_id, account.id);
    created(&request_id, AccountResponse::from(account))
}

/// `POST /doctors/register`
pub async fn register_doctor(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<RegisterDoctorRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;

    let account = state.auth.register_doctor(body.into()).await?;
    log::info!("[{}] doctor registered: {}", request_id, account.id);
    created(&request_id, AccountResponse::from(account))
}

/// `POST /login`
pub async fn login(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<LoginRequest>,
) -> ApiResult {
    body.validate()?;
    let tokens = state.auth.login(&body.email, &body.password).await?;
    ok(&request_id, tokens)
}

/// `POST /refresh-token`
pub async fn refresh_token(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<RefreshTokenRequest>,
) -> ApiResult {
    let tokens = state.auth.refresh(&body.refresh_token).await?;
    ok(&request_id, tokens)
}

/// `POST /verify-email`
pub async fn verify_email(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<VerifyEmailRequest>,
) -> ApiResult {
    let account = state.auth.verify_email(&body.token).await?;
    ok(&request_id, AccountResponse::from(account))
}

/// `POST /forgot-password`
///
/// Answers the same way whether or not the address is registered.
pub async fn forgot_password(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<ForgotPasswordRequest>,
) -> ApiResult {
    body.validate()?;
    state.auth.forgot_password(&body.email).await?;
    ok(
        &request_id,
        MessageResponse::new("If the address is registered, a reset link has been sent"),
    )
}

/// `POST /reset-password`
pub async fn reset_password(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<ResetPasswordRequest>,
) -> ApiResult {
    body.validate()?;
    state.auth.reset_password(&body.token, &body.password).await?;
    ok(&request_id, MessageResponse::new("Password has been reset"))
}
