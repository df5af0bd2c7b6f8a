//! Database migrations for the link store
//!
//! Versioned migrations for the link schema, applied atomically and tracked
//! in the `link_schema_version` table.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current schema version for the link store
pub const CURRENT_LINK_SCHEMA_VERSION: i32 = 1;

/// Migration descriptor
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub up_sql: &'static str,
}

/// All available migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "Initial link schema",
        up_sql: r#"
            -- Schema version tracking for the link store
            CREATE TABLE IF NOT EXISTS link_schema_version (
                version INTEGER PRIMARY KEY,
                applied_at INTEGER NOT NULL
            );

            -- Channel-to-room link entries. Several rows may share one
            -- remote_id (a channel bridged into multiple rooms).
            CREATE TABLE IF NOT EXISTS links (
                id TEXT PRIMARY KEY,                    -- entry id (UUID)
                remote_id TEXT NOT NULL,                -- discord_<guild>_<channel>_bridged
                room_id TEXT NOT NULL,                  -- local room id
                channel_id TEXT NOT NULL,
                guild_id TEXT NOT NULL,
                room_type TEXT NOT NULL,
                plumbed INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE (remote_id, room_id)
            );

            CREATE INDEX IF NOT EXISTS idx_links_remote ON links(remote_id);
            CREATE INDEX IF NOT EXISTS idx_links_metadata ON links(channel_id, guild_id, plumbed);
        "#,
    }]
}

/// Get current schema version from database
fn get_current_version(pool: &Pool<SqliteConnectionManager>) -> Result<i32, rusqlite::Error> {
    let conn = pool.get().map_err(|e| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to get connection: {}", e),
        )))
    })?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS link_schema_version (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let version: Result<i32, _> = conn.query_row(
        "SELECT version FROM link_schema_version ORDER BY version DESC LIMIT 1",
        [],
        |row| row.get(0),
    );

    Ok(version.unwrap_or(0))
}

/// Run all pending migrations
pub fn migrate(pool: &Pool<SqliteConnectionManager>) -> Result<(), rusqlite::Error> {
    let current_version = get_current_version(pool)?;

    let pending: Vec<_> = get_migrations()
        .into_iter()
        .filter(|m| m.version > current_version)
        .collect();

    if pending.is_empty() {
        return Ok(());
    }

    let conn = pool.get().map_err(|e| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to get connection: {}", e),
        )))
    })?;

    for migration in pending {
        tracing::info!(
            version = migration.version,
            description = migration.description,
            "applying link store migration"
        );

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.up_sql)?;

        let applied_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        tx.execute(
            "INSERT INTO link_schema_version (version, applied_at) VALUES (?, ?)",
            params![migration.version, applied_at],
        )?;

        tx.commit()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_pool() -> Pool<SqliteConnectionManager> {
        let manager = SqliteConnectionManager::memory();
        Pool::builder().max_size(1).build(manager).unwrap()
    }

    #[test]
    fn test_migrate_fresh_database() {
        let pool = memory_pool();
        migrate(&pool).unwrap();

        assert_eq!(
            get_current_version(&pool).unwrap(),
            CURRENT_LINK_SCHEMA_VERSION
        );
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let pool = memory_pool();
        migrate(&pool).unwrap();
        migrate(&pool).unwrap();

        let conn = pool.get().unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM link_schema_version", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(versions, 1);
    }
}
