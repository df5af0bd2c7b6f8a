//! End-to-end provisioning flows over the SQLite-backed link store

use roomlink_core::core_bridge::{
    AuthOutcome, ProvisionError, Provisioner, RemoteChannel, RemoteLinkFilter,
};
use roomlink_core::core_store::{LinkSqlStore, LinkStore};
use roomlink_core::test_utils::{test_room, RecordingNotifier};
use std::sync::Arc;
use std::time::Duration;

fn setup(
    notifier: RecordingNotifier,
) -> (
    Provisioner<LinkSqlStore, RecordingNotifier>,
    Arc<LinkSqlStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(LinkSqlStore::memory().expect("in-memory store"));
    let notifier = Arc::new(notifier);
    let provisioner = Provisioner::new(store.clone(), notifier.clone());
    (provisioner, store, notifier)
}

#[tokio::test]
async fn bridge_persists_canonical_link() {
    let (provisioner, store, _) = setup(RecordingNotifier::new());
    let channel = RemoteChannel::new("123", "456");

    let entry = provisioner
        .bridge_room(&channel, &test_room("!abc:local"))
        .await
        .expect("bridge");

    assert_eq!(entry.remote.id, "discord_456_123_bridged");
    assert_eq!(entry.local.room_id, test_room("!abc:local"));

    let metadata = serde_json::to_value(&entry.remote.data).expect("metadata");
    assert_eq!(metadata["discord_channel"], "123");
    assert_eq!(metadata["discord_guild"], "456");
    assert_eq!(metadata["discord_type"], "text");
    assert_eq!(metadata["plumbed"], true);

    let entries = store
        .entries_by_remote(&RemoteLinkFilter::plumbed_channel(&channel))
        .await
        .expect("lookup");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].local.room_id, test_room("!abc:local"));
}

#[tokio::test]
async fn capacity_check_is_a_soft_count() {
    let (provisioner, _, _) = setup(RecordingNotifier::new());
    let guild = "456";

    for i in 0..3 {
        provisioner
            .bridge_room(
                &RemoteChannel::new(format!("c{i}"), guild),
                &test_room("!abc:local"),
            )
            .await
            .expect("bridge");
    }

    assert!(!provisioner.room_count_limit_reached(-1).await.unwrap());
    assert!(provisioner.room_count_limit_reached(2).await.unwrap());
    assert!(provisioner.room_count_limit_reached(3).await.unwrap());
    assert!(!provisioner.room_count_limit_reached(4).await.unwrap());
}

#[tokio::test]
async fn unbridge_everywhere_tolerates_one_failing_room() {
    let notifier = RecordingNotifier::failing_for([test_room("!b:local")]);
    let (provisioner, store, notifier) = setup(notifier);
    let channel = RemoteChannel::new("123", "456");

    for room in ["!a:local", "!b:local", "!c:local"] {
        provisioner
            .bridge_room(&channel, &test_room(room))
            .await
            .expect("bridge");
    }

    provisioner
        .unbridge_channel(&channel, None)
        .await
        .expect("unbridge succeeds despite one failing teardown");

    let mut notified = notifier.calls().await;
    notified.sort();
    assert_eq!(
        notified,
        vec![test_room("!a:local"), test_room("!b:local"), test_room("!c:local")]
    );
    assert_eq!(store.count_entries().await.unwrap(), 0);
}

#[tokio::test]
async fn scoped_unbridge_deletes_by_remote_key() {
    let (provisioner, store, notifier) = setup(RecordingNotifier::new());
    let channel = RemoteChannel::new("123", "456");

    provisioner
        .bridge_room(&channel, &test_room("!a:local"))
        .await
        .expect("bridge a");
    provisioner
        .bridge_room(&channel, &test_room("!b:local"))
        .await
        .expect("bridge b");

    provisioner
        .unbridge_channel(&channel, Some(&test_room("!b:local")))
        .await
        .expect("unbridge");

    assert_eq!(notifier.calls().await, vec![test_room("!b:local")]);
    assert_eq!(store.count_entries().await.unwrap(), 0);
}

#[tokio::test]
async fn unbridge_of_unknown_channel_is_rejected() {
    let (provisioner, store, notifier) = setup(RecordingNotifier::new());

    provisioner
        .bridge_room(&RemoteChannel::new("123", "456"), &test_room("!a:local"))
        .await
        .expect("bridge");

    let result = provisioner
        .unbridge_channel(&RemoteChannel::new("999", "456"), None)
        .await;

    assert!(matches!(result, Err(ProvisionError::NotBridged)));
    assert_eq!(store.count_entries().await.unwrap(), 1);
    assert!(notifier.calls().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn pending_authorization_expires_after_timeout() {
    let store = Arc::new(LinkSqlStore::memory().expect("store"));
    let notifier = Arc::new(RecordingNotifier::new());
    let provisioner =
        Provisioner::with_auth_timeout(store, notifier, Duration::from_secs(300));

    let channel_id = roomlink_core::core_bridge::ChannelId::new("123");
    let pending = provisioner.pending_authorizations();

    let rx = pending.begin(channel_id.clone()).await;
    assert!(pending.is_pending(&channel_id).await);

    tokio::time::advance(Duration::from_secs(300) + Duration::from_millis(1)).await;
    assert_eq!(rx.await.unwrap(), AuthOutcome::TimedOut);
    assert!(!pending.is_pending(&channel_id).await);

    // A response that arrives after expiry is silently dropped
    assert!(!pending.resolve(&channel_id, AuthOutcome::Approved).await);
}
