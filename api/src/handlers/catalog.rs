//! Drug catalog: public browsing plus the admin maintenance endpoints

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, deleted, ok, ApiResult};
use crate::dto::catalog::{CategoryRequest, DrugQuery, DrugRequest};
use crate::middleware::RequestId;
use crate::state::AppState;

/// `GET /drugs`
pub async fn list_drugs(
    state: web::Data<AppState>,
    request_id: RequestId,
    query: web::Query<DrugQuery>,
) -> ApiResult {
    let page = state
        .catalog
        .list_drugs(query.search(), query.category_id, query.pagination())
        .await?;
    ok(&request_id, page)
}

/// `GET /drugs/:drug_id`
pub async fn get_drug(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    ok(&request_id, state.catalog.drug(path.into_inner()).await?)
}

/// `GET /drugs/:drug_id/pharmacies`
pub async fn drug_offers(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    ok(&request_id, state.catalog.drug_offers(path.into_inner()).await?)
}

pub async fn forms(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.catalog.forms().await?)
}

pub async fn classifications(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.catalog.classifications().await?)
}

pub async fn categories(state: web::Data<AppState>, request_id: RequestId) -> ApiResult {
    ok(&request_id, state.catalog.categories().await?)
}

/// `POST /admin/drugs`
pub async fn create_drug(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<DrugRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let drug = state.catalog.create_drug(body.into()).await?;
    log::info!("[{}] drug created: {} ({})", request_id, drug.name, drug.id);
    created(&request_id, drug)
}

/// `PUT /admin/drugs/:drug_id`
pub async fn update_drug(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<DrugRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let drug = state.catalog.update_drug(path.into_inner(), body.into()).await?;
    ok(&request_id, drug)
}

/// `DELETE /admin/drugs/:drug_id`; the drug is deactivated, not removed
pub async fn delete_drug(state: web::Data<AppState>, request_id: RequestId, path: web::Path<Uuid>) -> ApiResult {
    state.catalog.delete_drug(path.into_inner()).await?;
    deleted(&request_id)
}

/// `POST /admin/categories`
pub async fn create_category(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CategoryRequest>,
) -> ApiResult {
    body.validate()?;
    let category = state.catalog.create_category(&body.name).await?;
    created(&request_id, category)
}

/// `PUT /admin/categories/:category_id`
pub async fn update_category(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> ApiResult {
    body.validate()?;
    let category = state
        .catalog
        .update_category(path.into_inner(), &body.name)
        .await?;
    ok(&request_id, category)
}

/// `DELETE /admin/categories/:category_id`
pub async fn delete_category(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
) -> ApiResult {
    state.catalog.delete_category(path.into_inner()).await?;
    deleted(&request_id)
}
