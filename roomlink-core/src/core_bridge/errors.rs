//! Error types for the bridge core

use crate::core_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the link lifecycle manager
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Unlink found no persisted link for the given remote channel
    #[error("Channel is not bridged")]
    NotBridged,

    /// A persistence operation failed; propagated unmodified
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Failure of a single teardown notification.
///
/// Caught per target room during unlink fan-out; never fatal to the
/// enclosing operation.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The room-synchronization subsystem rejected or failed the teardown
    #[error("Room sync failed: {0}")]
    Sync(String),

    /// The remote network API call failed
    #[error("Remote API failed: {0}")]
    Remote(String),
}
