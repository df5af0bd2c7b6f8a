//! Link lifecycle manager
//!
//! Stateless coordinator over the link store and the teardown notifier.
//! Derives canonical record identities, persists pairings, enforces the
//! global capacity limit, and fans out teardown notifications on unlink.

use super::errors::ProvisionError;
use super::notifier::UnbridgeNotifier;
use super::pending::PendingAuthorizations;
use super::records::{LinkEntry, LocalRoomRecord, RemoteLinkFilter, RemoteRoomRecord};
use super::types::{RemoteChannel, RoomId};
use crate::core_store::LinkStore;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Link lifecycle manager.
///
/// Owns no mapping state itself; all of it lives in the store. The one
/// exception is the pending authorization table, which is owned outright
/// with a hard expiry.
pub struct Provisioner<S, N>
where
    S: LinkStore,
    N: UnbridgeNotifier,
{
    store: Arc<S>,
    notifier: Arc<N>,
    pending: PendingAuthorizations,
}

impl<S, N> Provisioner<S, N>
where
    S: LinkStore,
    N: UnbridgeNotifier,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Provisioner {
            store,
            notifier,
            pending: PendingAuthorizations::default(),
        }
    }

    /// Create a provisioner with a custom pending-authorization expiry
    pub fn with_auth_timeout(store: Arc<S>, notifier: Arc<N>, timeout: Duration) -> Self {
        Provisioner {
            store,
            notifier,
            pending: PendingAuthorizations::new(timeout),
        }
    }

    /// The table of in-flight authorization requests
    pub fn pending_authorizations(&self) -> &PendingAuthorizations {
        &self.pending
    }

    /// Link a remote channel to a local room.
    ///
    /// Builds the canonical remote record (always `plumbed`) and delegates
    /// persistence to the store, which is the single source of truth for
    /// uniqueness. Store failures propagate unmodified; no retry here.
    pub async fn bridge_room(
        &self,
        channel: &RemoteChannel,
        room_id: &RoomId,
    ) -> Result<LinkEntry, ProvisionError> {
        let remote = RemoteRoomRecord::plumbed_text(channel);
        let local = LocalRoomRecord::new(room_id.clone());

        debug!(
            channel = %channel.id,
            guild = %channel.guild_id,
            room = %room_id,
            remote_id = %remote.id,
            "bridging room"
        );

        let entry = self.store.link_rooms(local, remote).await?;
        info!(channel = %channel.id, room = %room_id, "room bridged");
        Ok(entry)
    }

    /// Returns whether the global link count has reached the limit.
    ///
    /// A negative limit means unlimited. This is a point-in-time soft check
    /// with no locking; concurrent bridges may overshoot by a small margin.
    pub async fn room_count_limit_reached(&self, limit: i64) -> Result<bool, ProvisionError> {
        if limit < 0 {
            return Ok(false);
        }
        let count = self.store.count_entries().await?;
        Ok(count as i64 >= limit)
    }

    /// Tear down the links of a remote channel.
    ///
    /// Resolves the persisted entries, fans out one teardown notification
    /// per target room (all of them, or just `only_room` when given), then
    /// deletes every entry sharing the resolved remote key. Notifier
    /// failures are logged per room and never block a sibling's teardown or
    /// the final deletion: a stale persisted link would block re-bridging,
    /// which is worse than an incomplete external teardown.
    pub async fn unbridge_channel(
        &self,
        channel: &RemoteChannel,
        only_room: Option<&RoomId>,
    ) -> Result<(), ProvisionError> {
        let filter = RemoteLinkFilter::plumbed_channel(channel);
        let entries = self.store.entries_by_remote(&filter).await?;

        let remote_id = match entries.first() {
            Some(entry) => entry.remote.id.clone(),
            None => return Err(ProvisionError::NotBridged),
        };

        let targets: Vec<RoomId> = match only_room {
            Some(room_id) => vec![room_id.clone()],
            None => entries.iter().map(|e| e.local.room_id.clone()).collect(),
        };

        join_all(targets.iter().map(|room_id| async move {
            if let Err(err) = self.notifier.on_unbridge(channel, room_id).await {
                warn!(
                    channel = %channel.id,
                    guild = %channel.guild_id,
                    room = %room_id,
                    error = %err,
                    "failed to cleanly unbridge room"
                );
            }
        }))
        .await;

        self.store.remove_entries_by_remote_id(&remote_id).await?;
        info!(channel = %channel.id, rooms = targets.len(), "channel unbridged");
        Ok(())
    }
}
