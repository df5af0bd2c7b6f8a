//! In-memory link store for tests

use crate::core_bridge::records::{
    LinkEntry, LocalRoomRecord, RemoteLinkFilter, RemoteRoomRecord,
};
use crate::core_store::{LinkStore, StoreError};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-memory `LinkStore` with the same upsert semantics as the SQL store
pub struct MemoryLinkStore {
    entries: Mutex<Vec<LinkEntry>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        MemoryLinkStore {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryLinkStore {
    fn default() -> Self {
        MemoryLinkStore::new()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn link_rooms(
        &self,
        local: LocalRoomRecord,
        remote: RemoteRoomRecord,
    ) -> Result<LinkEntry, StoreError> {
        let mut entries = self.entries.lock().await;

        if let Some(existing) = entries
            .iter_mut()
            .find(|e| e.remote.id == remote.id && e.local.room_id == local.room_id)
        {
            existing.remote.data = remote.data;
            return Ok(existing.clone());
        }

        let entry = LinkEntry::new(local, remote);
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn entries_by_remote(
        &self,
        filter: &RemoteLinkFilter,
    ) -> Result<Vec<LinkEntry>, StoreError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| filter.matches(&e.remote.data))
            .cloned()
            .collect())
    }

    async fn count_entries(&self) -> Result<usize, StoreError> {
        Ok(self.entries.lock().await.len())
    }

    async fn remove_entries_by_remote_id(&self, remote_id: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .retain(|e| e.remote.id != remote_id);
        Ok(())
    }
}
