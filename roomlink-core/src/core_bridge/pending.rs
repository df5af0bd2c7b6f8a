//! Pending authorization table
//!
//! Correlates asynchronous out-of-band authorization responses with the
//! requests that triggered them. Entries are bounded in time: a request
//! that is not resolved within the configured timeout is evicted and its
//! waiter observes `AuthOutcome::TimedOut`.

use super::types::ChannelId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tracing::debug;

/// Default expiry for a pending authorization request (5 minutes)
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(300);

/// Final outcome delivered to an authorization waiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Approved,
    Denied,
    /// No response arrived before the expiry
    TimedOut,
    /// A newer request for the same channel replaced this one
    Superseded,
}

/// Pending request awaiting a response
struct PendingEntry {
    outcome_tx: oneshot::Sender<AuthOutcome>,
    /// Handle to abort the expiry task once a response arrives
    timeout_handle: tokio::task::AbortHandle,
}

/// Table of in-flight authorization requests, keyed by remote channel.
///
/// Owned by the provisioner; an entry is removed either by a matching
/// `resolve` call or by its expiry task, whichever runs first.
pub struct PendingAuthorizations {
    entries: Arc<Mutex<HashMap<ChannelId, PendingEntry>>>,
    timeout: Duration,
}

impl PendingAuthorizations {
    pub fn new(timeout: Duration) -> Self {
        PendingAuthorizations {
            entries: Arc::new(Mutex::new(HashMap::new())),
            timeout,
        }
    }

    /// Register a pending request for the channel and return the receiver
    /// that will observe its outcome.
    ///
    /// A concurrent request for the same channel overwrites the previous
    /// entry; the replaced waiter observes `Superseded` immediately instead
    /// of hanging until the expiry.
    pub async fn begin(&self, channel_id: ChannelId) -> oneshot::Receiver<AuthOutcome> {
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let entries = self.entries.clone();
        let key = channel_id.clone();
        let timeout = self.timeout;
        let expiry_task = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some(entry) = entries.lock().await.remove(&key) {
                debug!(channel = %key, "authorization request expired");
                let _ = entry.outcome_tx.send(AuthOutcome::TimedOut);
            }
        });

        let entry = PendingEntry {
            outcome_tx,
            timeout_handle: expiry_task.abort_handle(),
        };

        if let Some(previous) = self.entries.lock().await.insert(channel_id, entry) {
            previous.timeout_handle.abort();
            let _ = previous.outcome_tx.send(AuthOutcome::Superseded);
        }

        outcome_rx
    }

    /// Deliver a response for the channel's pending request.
    ///
    /// Returns false if no request is pending (a late response after expiry
    /// or overwrite), in which case the response is silently dropped.
    pub async fn resolve(&self, channel_id: &ChannelId, outcome: AuthOutcome) -> bool {
        match self.entries.lock().await.remove(channel_id) {
            Some(entry) => {
                entry.timeout_handle.abort();
                let _ = entry.outcome_tx.send(outcome);
                true
            }
            None => {
                debug!(channel = %channel_id, "dropping authorization response with no pending request");
                false
            }
        }
    }

    /// Whether a request is currently pending for the channel
    pub async fn is_pending(&self, channel_id: &ChannelId) -> bool {
        self.entries.lock().await.contains_key(channel_id)
    }

    /// Number of in-flight requests
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for PendingAuthorizations {
    fn default() -> Self {
        PendingAuthorizations::new(DEFAULT_AUTH_TIMEOUT)
    }
}
