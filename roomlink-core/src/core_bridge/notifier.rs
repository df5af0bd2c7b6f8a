//! Teardown notifier port

use super::errors::NotifyError;
use super::types::{RemoteChannel, RoomId};
use async_trait::async_trait;
use tracing::debug;

/// Port for the room-synchronization subsystem that performs the actual
/// unlink side effects (membership removal, state changes) in the local
/// room system.
///
/// Each call may fail independently; callers catch failures per room and
/// must never let one room's failure block a sibling's teardown.
#[async_trait]
pub trait UnbridgeNotifier: Send + Sync {
    /// Perform the teardown side effects for one unbridged room
    async fn on_unbridge(&self, channel: &RemoteChannel, room_id: &RoomId)
        -> Result<(), NotifyError>;
}

/// No-op notifier for callers that provision links without a live
/// room-synchronization subsystem
pub struct NoopNotifier;

#[async_trait]
impl UnbridgeNotifier for NoopNotifier {
    async fn on_unbridge(
        &self,
        channel: &RemoteChannel,
        room_id: &RoomId,
    ) -> Result<(), NotifyError> {
        debug!(channel = %channel.id, room = %room_id, "no-op unbridge notification");
        Ok(())
    }
}
