//! SQLite-backed link store

use super::errors::StoreError;
use super::link_store::LinkStore;
use super::migrations;
use crate::core_bridge::records::{
    LinkEntry, LocalRoomRecord, RemoteLinkFilter, RemoteRoomData, RemoteRoomRecord,
};
use crate::core_bridge::types::{ChannelId, GuildId, RoomId, Timestamp};
use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Row};
use std::path::Path;

/// SQLite-backed storage for link entries
pub struct LinkSqlStore {
    pool: Pool<SqliteConnectionManager>,
}

impl LinkSqlStore {
    /// Create a store over an existing connection pool
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Result<Self, StoreError> {
        migrations::migrate(&pool).map_err(|e| StoreError::Migration(e.to_string()))?;
        Ok(LinkSqlStore { pool })
    }

    /// Open (or create) a store at the given database path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::new(manager)?;
        Self::new(pool)
    }

    /// Create an in-memory store.
    ///
    /// The pool is capped at one connection: each SQLite in-memory
    /// connection is a distinct database.
    pub fn memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;
        Self::new(pool)
    }

    fn map_link_row(row: &Row<'_>) -> rusqlite::Result<LinkEntry> {
        Ok(LinkEntry {
            id: row.get(0)?,
            remote: RemoteRoomRecord {
                id: row.get(1)?,
                data: RemoteRoomData {
                    channel_id: ChannelId::new(row.get::<_, String>(3)?),
                    guild_id: GuildId::new(row.get::<_, String>(4)?),
                    room_type: row.get(5)?,
                    plumbed: row.get::<_, i64>(6)? != 0,
                },
            },
            local: LocalRoomRecord {
                room_id: RoomId::new(row.get::<_, String>(2)?),
            },
            created_at: Timestamp::from_millis(row.get::<_, i64>(7)?.max(0) as u64),
        })
    }
}

const LINK_COLUMNS: &str =
    "id, remote_id, room_id, channel_id, guild_id, room_type, plumbed, created_at";

#[async_trait]
impl LinkStore for LinkSqlStore {
    async fn link_rooms(
        &self,
        local: LocalRoomRecord,
        remote: RemoteRoomRecord,
    ) -> Result<LinkEntry, StoreError> {
        let entry = LinkEntry::new(local, remote);
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO links (id, remote_id, room_id, channel_id, guild_id, room_type, plumbed, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (remote_id, room_id) DO UPDATE SET
                 room_type = excluded.room_type,
                 plumbed = excluded.plumbed",
            params![
                entry.id,
                entry.remote.id,
                entry.local.room_id.as_str(),
                entry.remote.data.channel_id.as_str(),
                entry.remote.data.guild_id.as_str(),
                entry.remote.data.room_type,
                entry.remote.data.plumbed as i64,
                entry.created_at.as_millis() as i64,
            ],
        )?;

        // On conflict the original row (id, created_at) is kept; read the
        // persisted state back so the caller sees what is actually stored.
        let stored = conn.query_row(
            &format!("SELECT {LINK_COLUMNS} FROM links WHERE remote_id = ? AND room_id = ?"),
            params![entry.remote.id, entry.local.room_id.as_str()],
            Self::map_link_row,
        )?;

        Ok(stored)
    }

    async fn entries_by_remote(
        &self,
        filter: &RemoteLinkFilter,
    ) -> Result<Vec<LinkEntry>, StoreError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM links
             WHERE (?1 IS NULL OR channel_id = ?1)
               AND (?2 IS NULL OR guild_id = ?2)
               AND (?3 IS NULL OR plumbed = ?3)
             ORDER BY created_at, id"
        ))?;

        let entries = stmt
            .query_map(
                params![
                    filter.channel_id.as_ref().map(|c| c.as_str()),
                    filter.guild_id.as_ref().map(|g| g.as_str()),
                    filter.plumbed.map(|p| p as i64),
                ],
                Self::map_link_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    async fn count_entries(&self) -> Result<usize, StoreError> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    async fn remove_entries_by_remote_id(&self, remote_id: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM links WHERE remote_id = ?", params![remote_id])?;
        Ok(())
    }
}
