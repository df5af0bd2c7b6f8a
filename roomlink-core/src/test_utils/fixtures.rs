//! Test fixtures for creating common bridge objects

use crate::core_bridge::types::{RemoteChannel, RoomId};

/// A remote channel handle with the given channel and guild ids
pub fn test_channel(channel_id: impl Into<String>, guild_id: impl Into<String>) -> RemoteChannel {
    RemoteChannel::new(channel_id, guild_id)
}

/// A local room id
pub fn test_room(room_id: impl Into<String>) -> RoomId {
    RoomId::new(room_id)
}
