use std::time::Duration;

use hc_core::PrescriptionItem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Upper bound a client may ask a long-poll to wait
pub const MAX_LISTEN_WAIT_SECS: u64 = 60;

/// Body of `POST /chat-rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub doctor_id: Uuid,
}

/// Body of `PATCH /chat-rooms`: a doctor accepts a waiting consultation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub room_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MessageRequest {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Query of the long-poll `GET /chat-rooms/chats/:room_id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenQuery {
    /// Last sequence number the client has seen
    #[serde(default)]
    pub after: u64,
    /// Seconds to wait for new messages; `0` returns immediately
    pub wait: Option<u64>,
}

impl ListenQuery {
    pub fn wait(&self) -> Option<Duration> {
        self.wait
            .map(|secs| Duration::from_secs(secs.min(MAX_LISTEN_WAIT_SECS)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PrescriptionRequest {
    #[validate(length(min = 1, max = 20))]
    pub items: Vec<PrescriptionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_wait_is_capped() {
        let query = ListenQuery {
            after: 3,
            wait: Some(3600),
        };
        assert_eq!(query.wait(), Some(Duration::from_secs(MAX_LISTEN_WAIT_SECS)));
        assert_eq!(ListenQuery::default().wait(), None);
    }
}
