//! Error types for the link store

use thiserror::Error;

/// Errors that can occur in the link store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to obtain a connection from the pool
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// A query or statement failed
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored row could not be mapped back to a record
    #[error("Corrupted row: {0}")]
    CorruptedRow(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Pool(err.to_string())
    }
}
