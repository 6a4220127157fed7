//! Checkout, payment and delivery from the buyer's side

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, ok, ApiResult};
use crate::dto::order::{CheckoutRequest, PaymentProofRequest};
use crate::middleware::{AuthContext, RequestId};
use crate::state::AppState;

/// `POST /orders`
pub async fn checkout(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<CheckoutRequest>,
) -> ApiResult {
    let details = state.orders.checkout(auth.account_id, body.address_id).await?;
    log::info!(
        "[{}] order {} placed by {} ({} pharmacy orders)",
        request_id,
        details.order.id,
        auth.account_id,
        details.pharmacy_orders.len()
    );
    created(&request_id, details)
}

/// `GET /orders`
pub async fn list_mine(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    ok(&request_id, state.orders.list_for_user(auth.account_id).await?)
}

/// `GET /orders/:order_id`, for the buyer or an admin
pub async fn get_order(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    ok(&request_id, state.orders.order(auth.actor(), path.into_inner()).await?)
}

/// `PATCH /orders/:order_id/payment-proof`
pub async fn upload_payment_proof(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<PaymentProofRequest>,
) -> ApiResult {
    body.validate()?;
    let order = state
        .orders
        .upload_payment_proof(auth.account_id, path.into_inner(), &body.proof_url)
        .await?;
    ok(&request_id, order)
}

/// `PATCH /orders/:order_id/confirm-payment`
pub async fn confirm_payment(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    let details = state.orders.confirm_payment(path.into_inner()).await?;
    log::info!("[{}] payment confirmed for order {}", request_id, details.order.id);
    ok(&request_id, details)
}

/// `PATCH /orders/:order_id/cancel`
pub async fn cancel(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    ok(&request_id, state.orders.cancel(auth.account_id, path.into_inner()).await?)
}

/// `GET /pharmacy-orders/:pharmacy_order_id`
pub async fn get_pharmacy_order(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let part = state
        .orders
        .pharmacy_order(auth.actor(), path.into_inner())
        .await?;
    ok(&request_id, part)
}

/// `PATCH /pharmacy-orders/:pharmacy_order_id/confirm-delivery`
pub async fn confirm_delivery(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let part = state
        .orders
        .confirm_delivery(auth.account_id, path.into_inner())
        .await?;
    ok(&request_id, part)
}
