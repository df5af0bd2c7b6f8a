//! Type definitions for the bridge core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a channel on the remote network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        ChannelId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the guild (enclosing scope) a remote channel lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub String);

impl GuildId {
    pub fn new(id: impl Into<String>) -> Self {
        GuildId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Native identifier of a room on the local room system (opaque string,
/// e.g. `!abc:local`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        RoomId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for a channel on the remote network.
///
/// Exposes the stable channel identifier and the stable identifier of its
/// enclosing guild. The remote API client that produces these handles is
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteChannel {
    pub id: ChannelId,
    pub guild_id: GuildId,
    /// Display name, carried for logging only
    pub name: Option<String>,
}

impl RemoteChannel {
    pub fn new(id: impl Into<String>, guild_id: impl Into<String>) -> Self {
        RemoteChannel {
            id: ChannelId::new(id),
            guild_id: GuildId::new(guild_id),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp representing the current time
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_millis() as u64)
    }

    /// Create a timestamp from milliseconds since epoch
    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Get milliseconds since epoch
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_handle_construction() {
        let channel = RemoteChannel::new("123", "456").with_name("general");
        assert_eq!(channel.id.as_str(), "123");
        assert_eq!(channel.guild_id.as_str(), "456");
        assert_eq!(channel.name.as_deref(), Some("general"));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ChannelId::new("123").to_string(), "123");
        assert_eq!(GuildId::new("456").to_string(), "456");
        assert_eq!(RoomId::new("!abc:local").to_string(), "!abc:local");
    }

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Timestamp::from_millis(1_700_000_000_000);
        assert_eq!(ts.as_millis(), 1_700_000_000_000);
    }
}
