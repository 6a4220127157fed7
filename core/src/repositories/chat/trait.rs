//! Chat repository trait for consultation rooms, messages and prescriptions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::entities::chat::{ChatMessage, ChatRoom, MessageKind, Prescription};
use crate::errors::DomainError;

/// A message before the repository assigns its sequence number
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub room_id: Uuid,
    pub sender_id: Uuid,
    pub sender_role: Role,
    pub kind: MessageKind,
    pub content: String,
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_room(&self, id: Uuid) -> Result<Option<ChatRoom>, DomainError>;

    /// Insert or replace a room
    async fn save_room(&self, room: ChatRoom) -> Result<ChatRoom, DomainError>;

    /// Rooms in which the account is the user or the doctor, newest first
    async fn list_rooms_for(&self, account_id: Uuid) -> Result<Vec<ChatRoom>, DomainError>;

    /// Every room, newest first
    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, DomainError>;

    /// The non-closed room between a user and a doctor, if any
    async fn find_open_room(
        &self,
        user_id: Uuid,
        doctor_id: Uuid,
    ) -> Result<Option<ChatRoom>, DomainError>;

    /// Append a message, assigning the next per-room sequence number
    async fn append_message(&self, message: NewMessage) -> Result<ChatMessage, DomainError>;

    /// Messages of a room with `seq > after_seq`, in sequence order
    async fn messages_after(&self, room_id: Uuid, after_seq: u64) -> Result<Vec<ChatMessage>, DomainError>;

    async fn save_prescription(&self, prescription: Prescription) -> Result<Prescription, DomainError>;

    async fn prescriptions_for_room(&self, room_id: Uuid) -> Result<Vec<Prescription>, DomainError>;

    /// Whether any prescription written for the user covers the drug
    async fn has_prescription(&self, user_id: Uuid, drug_id: Uuid) -> Result<bool, DomainError>;
}
