//! Persisted record shapes for channel-to-room links

use super::types::{ChannelId, GuildId, RemoteChannel, RoomId, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace tag for remote record keys
pub const REMOTE_NAMESPACE: &str = "discord";

/// Room type tag for plumbed text channels
pub const REMOTE_TYPE_TEXT: &str = "text";

/// Metadata carried on a remote room record.
///
/// The serialized field names (`discord_channel`, `discord_guild`,
/// `discord_type`, `plumbed`) are the on-disk metadata keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRoomData {
    #[serde(rename = "discord_channel")]
    pub channel_id: ChannelId,

    #[serde(rename = "discord_guild")]
    pub guild_id: GuildId,

    #[serde(rename = "discord_type")]
    pub room_type: String,

    /// True if the link was established via explicit provisioning rather
    /// than automatic discovery
    pub plumbed: bool,
}

/// Identity of a bridged channel on the remote network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRoomRecord {
    /// Canonical key: `discord_<guild>_<channel>_bridged`
    pub id: String,
    pub data: RemoteRoomData,
}

impl RemoteRoomRecord {
    /// Build the record for a plumbed text-channel link
    pub fn plumbed_text(channel: &RemoteChannel) -> Self {
        RemoteRoomRecord {
            id: format!(
                "{}_{}_{}_bridged",
                REMOTE_NAMESPACE, channel.guild_id, channel.id
            ),
            data: RemoteRoomData {
                channel_id: channel.id.clone(),
                guild_id: channel.guild_id.clone(),
                room_type: REMOTE_TYPE_TEXT.to_string(),
                plumbed: true,
            },
        }
    }
}

/// Identity of a room on the local room system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRoomRecord {
    pub room_id: RoomId,
}

impl LocalRoomRecord {
    pub fn new(room_id: RoomId) -> Self {
        LocalRoomRecord { room_id }
    }
}

/// A persisted association between one remote channel and one local room.
///
/// Several entries may share the same remote key when a channel is bridged
/// into multiple rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Row id, generated at creation
    pub id: String,
    pub local: LocalRoomRecord,
    pub remote: RemoteRoomRecord,
    pub created_at: Timestamp,
}

impl LinkEntry {
    pub fn new(local: LocalRoomRecord, remote: RemoteRoomRecord) -> Self {
        LinkEntry {
            id: Uuid::new_v4().to_string(),
            local,
            remote,
            created_at: Timestamp::now(),
        }
    }
}

/// Exact-match filter over remote record metadata.
///
/// Named optional fields instead of an open key-value map; a `None` field
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteLinkFilter {
    pub channel_id: Option<ChannelId>,
    pub guild_id: Option<GuildId>,
    pub plumbed: Option<bool>,
}

impl RemoteLinkFilter {
    /// Filter matching the plumbed links of one remote channel
    pub fn plumbed_channel(channel: &RemoteChannel) -> Self {
        RemoteLinkFilter {
            channel_id: Some(channel.id.clone()),
            guild_id: Some(channel.guild_id.clone()),
            plumbed: Some(true),
        }
    }

    /// Exact-match test against a record's metadata
    pub fn matches(&self, data: &RemoteRoomData) -> bool {
        if let Some(channel_id) = &self.channel_id {
            if channel_id != &data.channel_id {
                return false;
            }
        }
        if let Some(guild_id) = &self.guild_id {
            if guild_id != &data.guild_id {
                return false;
            }
        }
        if let Some(plumbed) = self.plumbed {
            if plumbed != data.plumbed {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_record_key_format() {
        let channel = RemoteChannel::new("123", "456");
        let record = RemoteRoomRecord::plumbed_text(&channel);

        assert_eq!(record.id, "discord_456_123_bridged");
        assert_eq!(record.data.channel_id, ChannelId::new("123"));
        assert_eq!(record.data.guild_id, GuildId::new("456"));
        assert_eq!(record.data.room_type, "text");
        assert!(record.data.plumbed);
    }

    #[test]
    fn test_remote_data_metadata_keys() {
        let channel = RemoteChannel::new("123", "456");
        let record = RemoteRoomRecord::plumbed_text(&channel);

        let metadata = serde_json::to_value(&record.data).unwrap();
        assert_eq!(metadata["discord_channel"], "123");
        assert_eq!(metadata["discord_guild"], "456");
        assert_eq!(metadata["discord_type"], "text");
        assert_eq!(metadata["plumbed"], true);
    }

    #[test]
    fn test_filter_matches_plumbed_channel() {
        let channel = RemoteChannel::new("123", "456");
        let record = RemoteRoomRecord::plumbed_text(&channel);
        let filter = RemoteLinkFilter::plumbed_channel(&channel);

        assert!(filter.matches(&record.data));
    }

    #[test]
    fn test_filter_rejects_other_channel() {
        let record = RemoteRoomRecord::plumbed_text(&RemoteChannel::new("123", "456"));
        let filter = RemoteLinkFilter::plumbed_channel(&RemoteChannel::new("999", "456"));

        assert!(!filter.matches(&record.data));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let record = RemoteRoomRecord::plumbed_text(&RemoteChannel::new("123", "456"));
        assert!(RemoteLinkFilter::default().matches(&record.data));
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let channel = RemoteChannel::new("123", "456");
        let a = LinkEntry::new(
            LocalRoomRecord::new(RoomId::new("!a:local")),
            RemoteRoomRecord::plumbed_text(&channel),
        );
        let b = LinkEntry::new(
            LocalRoomRecord::new(RoomId::new("!b:local")),
            RemoteRoomRecord::plumbed_text(&channel),
        );

        assert_ne!(a.id, b.id);
        assert_eq!(a.remote.id, b.remote.id);
    }
}
