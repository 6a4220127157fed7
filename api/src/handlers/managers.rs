//! Pharmacy-manager back office: pharmacies, inventory, stock movements,
//! fulfilment and sales reports. Every operation is scoped to the
//! pharmacies owned by the calling manager.

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, deleted, ok, ApiResult};
use crate::dto::order::PharmacyOrderStatusQuery;
use crate::dto::pharmacy::{
    InventoryItemRequest, InventoryUpdateRequest, PharmacyRequest, ReportQuery, StockMutationRequest,
};
use crate::middleware::{AuthContext, RequestId};
use crate::state::AppState;

pub async fn list_pharmacies(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    ok(&request_id, state.pharmacies.list_mine(auth.account_id).await?)
}

pub async fn create_pharmacy(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<PharmacyRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let pharmacy = state.pharmacies.create(auth.account_id, body.into()).await?;
    log::info!("[{}] pharmacy {} opened by {}", request_id, pharmacy.id, auth.account_id);
    created(&request_id, pharmacy)
}

pub async fn get_pharmacy(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    ok(&request_id, state.pharmacies.get(auth.account_id, path.into_inner()).await?)
}

pub async fn update_pharmacy(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<PharmacyRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let pharmacy = state
        .pharmacies
        .update(auth.account_id, path.into_inner(), body.into())
        .await?;
    ok(&request_id, pharmacy)
}

pub async fn delete_pharmacy(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    state.pharmacies.delete(auth.account_id, path.into_inner()).await?;
    deleted(&request_id)
}

/// `GET /managers/pharmacies/:pharmacy_id/drugs`
pub async fn list_inventory(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let entries = state
        .pharmacies
        .list_inventory(auth.account_id, path.into_inner())
        .await?;
    ok(&request_id, entries)
}

/// `POST /managers/pharmacies/:pharmacy_id/drugs`
pub async fn add_inventory_item(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<InventoryItemRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let item = state
        .pharmacies
        .add_drug(auth.account_id, path.into_inner(), body.into())
        .await?;
    created(&request_id, item)
}

/// `PUT /managers/pharmacies/:pharmacy_id/drugs/:pharmacy_drug_id`
pub async fn update_inventory_item(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<InventoryUpdateRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let (pharmacy_id, item_id) = path.into_inner();
    let item = state
        .pharmacies
        .update_drug(auth.account_id, pharmacy_id, item_id, body.into())
        .await?;
    ok(&request_id, item)
}

/// `GET /managers/stock-changes`
pub async fn stock_changes(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    ok(&request_id, state.pharmacies.stock_changes(auth.account_id).await?)
}

/// `POST /managers/stock-mutations`
pub async fn mutate_stock(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<StockMutationRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let receipt = state.pharmacies.mutate_stock(auth.account_id, body.into()).await?;
    created(&request_id, receipt)
}

/// `GET /managers/orders`
pub async fn list_orders(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    query: web::Query<PharmacyOrderStatusQuery>,
) -> ApiResult {
    let orders = state
        .orders
        .list_for_manager(auth.account_id, query.status)
        .await?;
    ok(&request_id, orders)
}

/// `PATCH /managers/orders/:pharmacy_order_id/send`
pub async fn send_order(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    ok(&request_id, state.orders.send(auth.account_id, path.into_inner()).await?)
}

/// `PATCH /managers/orders/:pharmacy_order_id/cancel`
pub async fn cancel_order(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let part = state
        .orders
        .cancel_by_manager(auth.account_id, path.into_inner())
        .await?;
    ok(&request_id, part)
}

/// `GET /managers/reports`
pub async fn reports(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    query: web::Query<ReportQuery>,
) -> ApiResult {
    let sales = state
        .reports
        .for_manager(auth.account_id, query.pharmacy_id)
        .await?;
    ok(&request_id, sales)
}
