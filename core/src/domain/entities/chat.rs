//! Telemedicine consultation entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Role;

/// Lifecycle of a consultation room: `waiting -> active -> closed`.
/// A waiting room may also be closed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Requested by the user, not yet joined by the doctor
    Waiting,
    Active,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: Uuid,
    pub user_id: Uuid,
    pub doctor_id: Uuid,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl ChatRoom {
    pub fn new(user_id: Uuid, doctor_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            doctor_id,
            status: RoomStatus::Waiting,
            created_at: Utc::now(),
            closed_at: None,
        }
    }

    pub fn is_participant(&self, account_id: Uuid) -> bool {
        self.user_id == account_id || self.doctor_id == account_id
    }

    pub fn is_closed(&self) -> bool {
        self.status == RoomStatus::Closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    /// Content holds the id of the prescription written in the room
    Prescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Per-room sequence number, starting at 1
    pub seq: u64,
    pub room_id: Uuid,
    pub sender_id: Uuid,
    pub sender_role: Role,
    pub kind: MessageKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub drug_id: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub room_id: Uuid,
    pub doctor_id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<PrescriptionItem>,
    pub created_at: DateTime<Utc>,
}

impl Prescription {
    pub fn covers(&self, drug_id: Uuid) -> bool {
        self.items.iter().any(|item| item.drug_id == drug_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_participants() {
        let user = Uuid::new_v4();
        let doctor = Uuid::new_v4();
        let room = ChatRoom::new(user, doctor);
        assert!(room.is_participant(user));
        assert!(room.is_participant(doctor));
        assert!(!room.is_participant(Uuid::new_v4()));
        assert_eq!(room.status, RoomStatus::Waiting);
    }
}
