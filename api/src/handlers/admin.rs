//! Platform administration: partners and read-only views over every
//! pharmacy. Catalog maintenance lives in [`super::catalog`].

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, deleted, ok, ApiResult};
use crate::dto::order::OrderStatusQuery;
use crate::dto::partner::{PartnerRequest, PartnerUpdateRequest};
use crate::dto::pharmacy::ReportQuery;
use crate::middleware::RequestId;
use crate::state::AppState;

/// `POST /admin/partners`
pub async fn create_partner(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<PartnerRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let partner = state.partners.create_partner(body.into()).await?;
    log::info!("[{}] partner created: {} ({})", request_id, partner.company_name, partner.account_id);
    created(&request_id, partner)
}

pub async fn list_partners(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.partners.list().await?)
}

pub async fn get_partner(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    ok(&request_id, state.partners.get(path.into_inner()).await?)
}

pub async fn update_partner(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<PartnerUpdateRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let partner = state.partners.update(path.into_inner(), body.into()).await?;
    ok(&request_id, partner)
}

/// Refused while the partner's manager still owns pharmacies
pub async fn delete_partner(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    state.partners.delete(path.into_inner()).await?;
    deleted(&request_id)
}

/// `GET /admin/drugs/reports`
pub async fn drug_reports(
    state: web::Data<AppState>,
    request_id: RequestId,
    query: web::Query<ReportQuery>,
) -> ApiResult {
    ok(&request_id, state.reports.for_admin(query.pharmacy_id).await?)
}

pub async fn list_pharmacies(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.pharmacies.list_all().await?)
}

/// `GET /admin/orders?status=`
pub async fn list_orders(
    state: web::Data<AppState>,
    request_id: RequestId,
    query: web::Query<OrderStatusQuery>,
) -> ApiResult {
    ok(&request_id, state.orders.list_all(query.status).await?)
}

pub async fn stock_changes(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.pharmacies.all_stock_changes().await?)
}
