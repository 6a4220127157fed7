//! In-memory implementation of ChatRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::chat::{ChatMessage, ChatRoom, Prescription};
use crate::errors::DomainError;

use super::trait_::{ChatRepository, NewMessage};

#[derive(Default)]
struct ChatState {
    rooms: HashMap<Uuid, ChatRoom>,
    /// Messages per room, in sequence order
    messages: HashMap<Uuid, Vec<ChatMessage>>,
    prescriptions: Vec<Prescription>,
}

/// In-memory chat repository
#[derive(Clone, Default)]
pub struct InMemoryChatRepository {
    state: Arc<RwLock<ChatState>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut rooms: Vec<ChatRoom>) -> Vec<ChatRoom> {
    rooms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rooms
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn find_room(&self, id: Uuid) -> Result<Option<ChatRoom>, DomainError> {
        Ok(self.state.read().await.rooms.get(&id).cloned())
    }

    async fn save_room(&self, room: ChatRoom) -> Result<ChatRoom, DomainError> {
        self.state.write().await.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn list_rooms_for(&self, account_id: Uuid) -> Result<Vec<ChatRoom>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .rooms
                .values()
                .filter(|r| r.is_participant(account_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first(state.rooms.values().cloned().collect()))
    }

    async fn find_open_room(
        &self,
        user_id: Uuid,
        doctor_id: Uuid,
    ) -> Result<Option<ChatRoom>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rooms
            .values()
            .find(|r| r.user_id == user_id && r.doctor_id == doctor_id && !r.is_closed())
            .cloned())
    }

    async fn append_message(&self, message: NewMessage) -> Result<ChatMessage, DomainError> {
        let mut state = self.state.write().await;
        if !state.rooms.contains_key(&message.room_id) {
            return Err(DomainError::not_found("chat room"));
        }

        let log = state.messages.entry(message.room_id).or_default();
        let stored = ChatMessage {
            seq: log.len() as u64 + 1,
            room_id: message.room_id,
            sender_id: message.sender_id,
            sender_role: message.sender_role,
            kind: message.kind,
            content: message.content,
            created_at: Utc::now(),
        };
        log.push(stored.clone());
        Ok(stored)
    }

    async fn messages_after(&self, room_id: Uuid, after_seq: u64) -> Result<Vec<ChatMessage>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .get(&room_id)
            .map(|log| {
                // seq n lives at index n - 1
                let start = usize::try_from(after_seq).unwrap_or(usize::MAX).min(log.len());
                log[start..].to_vec()
            })
            .unwrap_or_default())
    }

    async fn save_prescription(&self, prescription: Prescription) -> Result<Prescription, DomainError> {
        self.state.write().await.prescriptions.push(prescription.clone());
        Ok(prescription)
    }

    async fn prescriptions_for_room(&self, room_id: Uuid) -> Result<Vec<Prescription>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .prescriptions
            .iter()
            .filter(|p| p.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn has_prescription(&self, user_id: Uuid, drug_id: Uuid) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .prescriptions
            .iter()
            .any(|p| p.user_id == user_id && p.covers(drug_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::Role;
    use crate::domain::entities::chat::MessageKind;

    fn text(room_id: Uuid, sender_id: Uuid, content: &str) -> NewMessage {
        NewMessage {
            room_id,
            sender_id,
            sender_role: Role::User,
            kind: MessageKind::Text,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_per_room() {
        let repo = InMemoryChatRepository::new();
        let user = Uuid::new_v4();
        let first = repo.save_room(ChatRoom::new(user, Uuid::new_v4())).await.unwrap();
        let second = repo.save_room(ChatRoom::new(user, Uuid::new_v4())).await.unwrap();

        assert_eq!(repo.append_message(text(first.id, user, "a")).await.unwrap().seq, 1);
        assert_eq!(repo.append_message(text(first.id, user, "b")).await.unwrap().seq, 2);
        assert_eq!(repo.append_message(text(second.id, user, "c")).await.unwrap().seq, 1);

        let after = repo.messages_after(first.id, 1).await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].content, "b");
        assert!(repo.messages_after(first.id, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_to_unknown_room_fails() {
        let repo = InMemoryChatRepository::new();
        let err = repo
            .append_message(text(Uuid::new_v4(), Uuid::new_v4(), "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
