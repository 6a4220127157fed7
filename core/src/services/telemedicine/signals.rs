//! Per-room wake-up signals for parked listeners

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Default)]
pub(super) struct RoomSignals {
    rooms: Mutex<HashMap<Uuid, Arc<Notify>>>,
}

impl RoomSignals {
    /// The signal of a room, created on first use
    pub fn get(&self, room_id: Uuid) -> Arc<Notify> {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        rooms.entry(room_id).or_default().clone()
    }

    /// Wake every listener currently parked on the room
    ///
    /// Listeners register before they park, so a room without a signal has
    /// nobody to wake.
    pub fn wake(&self, room_id: Uuid) {
        let rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(signal) = rooms.get(&room_id) {
            signal.notify_waiters();
        }
    }

    /// Drop the signal of a room nobody will wait on again
    pub fn forget(&self, room_id: Uuid) {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        rooms.remove(&room_id);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
