//! Notifier test doubles

use crate::core_bridge::errors::NotifyError;
use crate::core_bridge::notifier::UnbridgeNotifier;
use crate::core_bridge::types::{RemoteChannel, RoomId};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// Notifier that records every call and can be told to fail for specific
/// rooms
pub struct RecordingNotifier {
    calls: Mutex<Vec<RoomId>>,
    fail_rooms: HashSet<RoomId>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        RecordingNotifier {
            calls: Mutex::new(Vec::new()),
            fail_rooms: HashSet::new(),
        }
    }

    /// A notifier that fails for the given rooms (calls are still recorded)
    pub fn failing_for(rooms: impl IntoIterator<Item = RoomId>) -> Self {
        RecordingNotifier {
            calls: Mutex::new(Vec::new()),
            fail_rooms: rooms.into_iter().collect(),
        }
    }

    /// Rooms notified so far, in call order
    pub async fn calls(&self) -> Vec<RoomId> {
        self.calls.lock().await.clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        RecordingNotifier::new()
    }
}

#[async_trait]
impl UnbridgeNotifier for RecordingNotifier {
    async fn on_unbridge(
        &self,
        _channel: &RemoteChannel,
        room_id: &RoomId,
    ) -> Result<(), NotifyError> {
        self.calls.lock().await.push(room_id.clone());
        if self.fail_rooms.contains(room_id) {
            return Err(NotifyError::Sync(format!(
                "simulated teardown failure for {room_id}"
            )));
        }
        Ok(())
    }
}
