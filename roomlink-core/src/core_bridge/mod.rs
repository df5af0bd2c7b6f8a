//! Bridge provisioning core
//!
//! Owns the lifecycle of channel-to-room links: creation, capacity checks,
//! and teardown with per-room fan-out. Persistence and teardown side effects
//! are delegated to the `LinkStore` and `UnbridgeNotifier` collaborators.

pub mod errors;
pub mod notifier;
pub mod pending;
pub mod provisioner;
pub mod records;
pub mod types;

pub use errors::{NotifyError, ProvisionError};
pub use notifier::{NoopNotifier, UnbridgeNotifier};
pub use pending::{AuthOutcome, PendingAuthorizations, DEFAULT_AUTH_TIMEOUT};
pub use provisioner::Provisioner;
pub use records::{LinkEntry, LocalRoomRecord, RemoteLinkFilter, RemoteRoomData, RemoteRoomRecord};
pub use types::{ChannelId, GuildId, RemoteChannel, RoomId, Timestamp};
