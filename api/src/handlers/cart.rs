use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, deleted, ok, ApiResult};
use crate::dto::order::{CartItemRequest, CartQuantityRequest};
use crate::middleware::{AuthContext, RequestId};
use crate::state::AppState;

/// `GET /cart`
pub async fn view(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    ok(&request_id, state.carts.view(auth.account_id).await?)
}

/// `POST /cart`; adding an item already in the cart raises its quantity
pub async fn add_item(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<CartItemRequest>,
) -> ApiResult {
    body.validate()?;
    let item = state
        .carts
        .add(auth.account_id, body.pharmacy_drug_id, body.quantity)
        .await?;
    created(&request_id, item)
}

/// `PUT /cart/:cart_item_id`
pub async fn update_item(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<CartQuantityRequest>,
) -> ApiResult {
    body.validate()?;
    let item = state
        .carts
        .update(auth.account_id, path.into_inner(), body.quantity)
        .await?;
    ok(&request_id, item)
}

/// `DELETE /cart/:cart_item_id`
pub async fn remove_item(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    state.carts.remove(auth.account_id, path.into_inner()).await?;
    deleted(&request_id)
}
