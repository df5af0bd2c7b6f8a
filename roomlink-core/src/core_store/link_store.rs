//! Link store contract

use super::errors::StoreError;
use crate::core_bridge::records::{LinkEntry, LocalRoomRecord, RemoteLinkFilter, RemoteRoomRecord};
use async_trait::async_trait;

/// Contract for the persistent link record store.
///
/// The store is the single shared mutable resource of the bridge core and
/// the sole arbiter of mapping state; it is responsible for its own
/// internal concurrency control.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persist a pairing atomically and return the stored entry.
    ///
    /// The store arbitrates uniqueness: re-linking an identical pairing
    /// refreshes the existing row rather than duplicating it.
    async fn link_rooms(
        &self,
        local: LocalRoomRecord,
        remote: RemoteRoomRecord,
    ) -> Result<LinkEntry, StoreError>;

    /// All entries whose remote metadata exactly matches the filter
    async fn entries_by_remote(
        &self,
        filter: &RemoteLinkFilter,
    ) -> Result<Vec<LinkEntry>, StoreError>;

    /// Total number of persisted link entries
    async fn count_entries(&self) -> Result<usize, StoreError>;

    /// Delete every entry keyed by the given remote record id
    async fn remove_entries_by_remote_id(&self, remote_id: &str) -> Result<(), StoreError>;
}
