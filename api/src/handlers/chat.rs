//! Telemedicine consultations over HTTP long-poll
//!
//! A user opens a room with an online doctor, the doctor joins it, and both
//! sides post messages and poll `GET /chat-rooms/chats/:room_id?after=N`
//! for anything newer than the last sequence number they saw.

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use super::response::{created, ok, ApiResult};
use crate::dto::chat::{CreateRoomRequest, JoinRoomRequest, ListenQuery, MessageRequest, PrescriptionRequest};
use crate::middleware::{AuthContext, RequestId};
use crate::state::AppState;

/// `POST /chat-rooms`
pub async fn create_room(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<CreateRoomRequest>,
) -> ApiResult {
    let room = state
        .telemedicine
        .create_room(auth.account_id, body.doctor_id)
        .await?;
    created(&request_id, room)
}

/// `PATCH /chat-rooms`
pub async fn join_room(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    body: web::Json<JoinRoomRequest>,
) -> ApiResult {
    let room = state.telemedicine.join_room(auth.account_id, body.room_id).await?;
    ok(&request_id, room)
}

/// `GET /chat-rooms`
pub async fn list_rooms(state: web::Data<AppState>, request_id: RequestId, auth: AuthContext) -> ApiResult {
    ok(&request_id, state.telemedicine.rooms(auth.actor()).await?)
}

/// `GET /chat-rooms/chats/:room_id`
pub async fn listen(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    query: web::Query<ListenQuery>,
) -> ApiResult {
    let batch = state
        .telemedicine
        .listen(auth.actor(), path.into_inner(), query.after, query.wait())
        .await?;
    ok(&request_id, batch)
}

/// `POST /chat-rooms/chats/:room_id`
pub async fn post_message(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<MessageRequest>,
) -> ApiResult {
    body.validate()?;
    let message = state
        .telemedicine
        .post_message(auth.actor(), path.into_inner(), &body.content)
        .await?;
    created(&request_id, message)
}

/// `PATCH /chat-rooms/:room_id/close`
pub async fn close_room(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let room = state.telemedicine.close_room(auth.actor(), path.into_inner()).await?;
    ok(&request_id, room)
}

/// `POST /chat-rooms/:room_id/prescriptions`
pub async fn prescribe(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<PrescriptionRequest>,
) -> ApiResult {
    let body = body.into_inner();
    body.validate()?;
    let prescription = state
        .telemedicine
        .prescribe(auth.actor(), path.into_inner(), body.items)
        .await?;
    created(&request_id, prescription)
}

/// `GET /chat-rooms/:room_id/prescriptions`
pub async fn prescriptions(
    state: web::Data<AppState>,
    request_id: RequestId,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> ApiResult {
    let prescriptions = state
        .telemedicine
        .prescriptions(auth.actor(), path.into_inner())
        .await?;
    ok(&request_id, prescriptions)
}
