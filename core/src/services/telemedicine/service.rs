//! Consultation rooms, messages and prescriptions

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use uuid::Uuid;

use crate::domain::entities::account::{Actor, Role};
use crate::domain::entities::chat::{
    ChatMessage, ChatRoom, MessageKind, Prescription, PrescriptionItem, RoomStatus,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CatalogRepository, ChatRepository, NewMessage, ProfileRepository};

use super::signals::RoomSignals;

/// How long a listener is parked when no timeout is requested
pub const DEFAULT_LISTEN_TIMEOUT: Duration = Duration::from_secs(25);

/// Result of one long-poll
#[derive(Debug, Clone, Serialize)]
pub struct ListenBatch {
    /// Messages after the requested sequence number, possibly empty
    pub messages: Vec<ChatMessage>,
    pub status: RoomStatus,
    /// Sequence number to resume from
    pub last_seq: u64,
}

pub struct TelemedicineService {
    chats: Arc<dyn ChatRepository>,
    profiles: Arc<dyn ProfileRepository>,
    catalog: Arc<dyn CatalogRepository>,
    signals: RoomSignals,
    listen_timeout: Duration,
}

impl TelemedicineService {
    pub fn new(
        chats: Arc<dyn ChatRepository>,
        profiles: Arc<dyn ProfileRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            chats,
            profiles,
            catalog,
            signals: RoomSignals::default(),
            listen_timeout: DEFAULT_LISTEN_TIMEOUT,
        }
    }

    /// Override the default long-poll timeout
    pub fn with_listen_timeout(mut self, timeout: Duration) -> Self {
        self.listen_timeout = timeout;
        self
    }

    #[cfg(test)]
    pub(super) fn tracked_rooms(&self) -> usize {
        self.signals.len()
    }

    async fn room(&self, room_id: Uuid) -> DomainResult<ChatRoom> {
        self.chats
            .find_room(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("chat room"))
    }

    /// The room if the actor takes part in it
    async fn participant_room(&self, actor: Actor, room_id: Uuid) -> DomainResult<ChatRoom> {
        let room = self.room(room_id).await?;
        if !room.is_participant(actor.account_id) {
            return Err(DomainError::forbidden("Not a participant of this room"));
        }
        Ok(room)
    }

    /// Open a consultation with an online doctor
    pub async fn create_room(&self, user_id: Uuid, doctor_id: Uuid) -> DomainResult<ChatRoom> {
        let doctor = self
            .profiles
            .find_doctor_profile(doctor_id)
            .await?
            .ok_or_else(|| DomainError::not_found("doctor"))?;
        if !doctor.is_online {
            return Err(DomainError::conflict("Doctor is not accepting consultations"));
        }
        if self.chats.find_open_room(user_id, doctor_id).await?.is_some() {
            return Err(DomainError::conflict("A consultation with this doctor is already open"));
        }

        let room = self.chats.save_room(ChatRoom::new(user_id, doctor_id)).await?;
        tracing::info!(room_id = %room.id, user_id = %user_id, doctor_id = %doctor_id, "chat room created");
        Ok(room)
    }

    /// Doctor accepts a waiting consultation
    pub async fn join_room(&self, doctor_id: Uuid, room_id: Uuid) -> DomainResult<ChatRoom> {
        let mut room = self.room(room_id).await?;
        if room.doctor_id != doctor_id {
            return Err(DomainError::forbidden("Room is assigned to another doctor"));
        }
        if room.status != RoomStatus::Waiting {
            return Err(DomainError::conflict("Room is not waiting for a doctor"));
        }
        room.status = RoomStatus::Active;
        let room = self.chats.save_room(room).await?;
        self.signals.wake(room.id);
        Ok(room)
    }

    /// Rooms visible to the actor
    pub async fn rooms(&self, actor: Actor) -> DomainResult<Vec<ChatRoom>> {
        match actor.role {
            Role::Admin => self.chats.list_rooms().await,
            Role::User | Role::Doctor => self.chats.list_rooms_for(actor.account_id).await,
            Role::PharmacyManager => Ok(Vec::new()),
        }
    }

    pub async fn post_message(&self, sender: Actor, room_id: Uuid, content: &str) -> DomainResult<ChatMessage> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::validation("Message must not be empty"));
        }
        let room = self.participant_room(sender, room_id).await?;
        self.append(&room, sender, MessageKind::Text, content.to_string()).await
    }

    async fn append(&self, room: &ChatRoom, sender: Actor, kind: MessageKind, content: String) -> DomainResult<ChatMessage> {
        if room.is_closed() {
            return Err(DomainError::conflict("Room is closed"));
        }
        let message = self
            .chats
            .append_message(NewMessage {
                room_id: room.id,
                sender_id: sender.account_id,
                sender_role: sender.role,
                kind,
                content,
            })
            .await?;
        self.signals.wake(room.id);
        Ok(message)
    }

    /// Long-poll for messages after `after_seq`
    ///
    /// Returns at once if such messages exist or the room is closed;
    /// otherwise parks until a post, a close, or the timeout.
    pub async fn listen(
        &self,
        viewer: Actor,
        room_id: Uuid,
        after_seq: u64,
        wait: Option<Duration>,
    ) -> DomainResult<ListenBatch> {
        let room = self.participant_room(viewer, room_id).await?;
        if room.is_closed() {
            let messages = self.chats.messages_after(room_id, after_seq).await?;
            return Ok(batch(messages, room.status, after_seq));
        }

        let deadline = Instant::now() + wait.unwrap_or(self.listen_timeout);
        let signal = self.signals.get(room_id);

        loop {
            // Register interest before reading so a post landing between
            // the read and the wait is not missed.
            let notified = signal.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let messages = self.chats.messages_after(room_id, after_seq).await?;
            let room = self.room(room_id).await?;
            if room.is_closed() {
                // Closed after the signal was looked up
                self.signals.forget(room_id);
                return Ok(batch(messages, room.status, after_seq));
            }
            if !messages.is_empty() {
                return Ok(batch(messages, room.status, after_seq));
            }

            if timeout_at(deadline, notified).await.is_err() {
                return Ok(batch(Vec::new(), room.status, after_seq));
            }
        }
    }

    /// Close a consultation. Parked listeners wake up with the new status.
    pub async fn close_room(&self, actor: Actor, room_id: Uuid) -> DomainResult<ChatRoom> {
        let mut room = self.participant_room(actor, room_id).await?;
        if room.is_closed() {
            return Err(DomainError::conflict("Room is already closed"));
        }
        room.status = RoomStatus::Closed;
        room.closed_at = Some(Utc::now());
        let room = self.chats.save_room(room).await?;

        self.signals.wake(room.id);
        self.signals.forget(room.id);
        tracing::info!(room_id = %room.id, closed_by = %actor.account_id, "chat room closed");
        Ok(room)
    }

    /// Write a prescription in an active room and announce it in the chat
    pub async fn prescribe(
        &self,
        doctor: Actor,
        room_id: Uuid,
        items: Vec<PrescriptionItem>,
    ) -> DomainResult<Prescription> {
        let room = self.room(room_id).await?;
        if room.doctor_id != doctor.account_id {
            return Err(DomainError::forbidden("Only the room's doctor can prescribe"));
        }
        if room.status != RoomStatus::Active {
            return Err(DomainError::conflict("Room is not active"));
        }
        if items.is_empty() {
            return Err(DomainError::validation("Prescription needs at least one drug"));
        }
        for item in &items {
            if item.quantity == 0 {
                return Err(DomainError::validation("Prescribed quantity must be at least 1"));
            }
            match self.catalog.find_drug(item.drug_id).await? {
                Some(drug) if drug.is_active => {}
                _ => return Err(DomainError::validation(format!("Unknown drug {}", item.drug_id))),
            }
        }

        let prescription = self
            .chats
            .save_prescription(Prescription {
                id: Uuid::new_v4(),
                room_id,
                doctor_id: room.doctor_id,
                user_id: room.user_id,
                items,
                created_at: Utc::now(),
            })
            .await?;
        self.append(&room, doctor, MessageKind::Prescription, prescription.id.to_string())
            .await?;
        Ok(prescription)
    }

    pub async fn prescriptions(&self, viewer: Actor, room_id: Uuid) -> DomainResult<Vec<Prescription>> {
        self.participant_room(viewer, room_id).await?;
        self.chats.prescriptions_for_room(room_id).await
    }

    /// Whether a doctor has prescribed the drug to the user
    pub async fn has_prescription(&self, user_id: Uuid, drug_id: Uuid) -> DomainResult<bool> {
        self.chats.has_prescription(user_id, drug_id).await
    }
}

fn batch(messages: Vec<ChatMessage>, status: RoomStatus, after_seq: u64) -> ListenBatch {
    let last_seq = messages.last().map_or(after_seq, |m| m.seq);
    ListenBatch {
        messages,
        status,
        last_seq,
    }
}
