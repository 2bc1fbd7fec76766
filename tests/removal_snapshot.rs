// tests/removal_snapshot.rs

use exechook::engine::{PreRemovalCache, Snapshot};
use exechook::errors::ExecHookError;
use exechook::host::{EventBus, MemoryItemRegistry, Notification};
use exechook::types::{EventKind, NotificationName};
use exechook_test_utils::builders::{CommandRecordBuilder, ConfigFileBuilder, ItemBuilder};
use exechook_test_utils::{init_tracing, Harness};

const CLEANUP: &str = "/opt/hooks/cleanup";

fn removal_config() -> exechook::config::ConfigFile {
    ConfigFileBuilder::new()
        .with_command(
            CommandRecordBuilder::new("gone", EventKind::Removed, "/opt/hooks/cleanup <id> <na> <dl>")
                .label("tv")
                .build(),
        )
        .build()
}

#[tokio::test]
async fn removed_without_snapshot_fails_and_runs_nothing() {
    init_tracing();

    let h = Harness::start(removal_config(), &[CLEANUP]).await;
    h.registry.insert("abc", ItemBuilder::new("Show").label("tv").build());

    let err = h
        .plugin
        .dispatcher()
        .execute_commands("abc", EventKind::Removed, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ExecHookError::SnapshotNotFound(ref id) if id == "abc"));
    assert!(err.is_not_found());
    assert!(h.executor.invocations().is_empty());
}

#[tokio::test]
async fn snapshot_survives_item_removal_and_is_consumed_once() {
    init_tracing();

    let h = Harness::start(removal_config(), &[CLEANUP]).await;
    h.registry.insert(
        "abc",
        ItemBuilder::new("Show")
            .save_path("/tv/incoming")
            .label("TV")
            .build(),
    );

    h.bus
        .emit(Notification::PreItemRemoved {
            item_id: "abc".into(),
        })
        .await;
    assert!(h.plugin.dispatcher().has_snapshot("abc").await);

    h.registry.remove("abc");
    h.bus
        .emit(Notification::ItemRemoved {
            item_id: "abc".into(),
            extra: vec![],
        })
        .await;

    let scripts = h.executor.scripts();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].args, vec!["abc", "Show", "/tv/incoming"]);
    assert!(!h.plugin.dispatcher().has_snapshot("abc").await);

    // A second removal notification has nothing left to read.
    let err = h
        .plugin
        .dispatcher()
        .execute_commands("abc", EventKind::Removed, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ExecHookError::SnapshotNotFound(_)));
    assert_eq!(h.executor.scripts().len(), 1);
}

#[tokio::test]
async fn pre_removed_handler_only_exists_with_a_removed_command() {
    init_tracing();

    let only_complete = ConfigFileBuilder::new()
        .with_command(CommandRecordBuilder::new("c", EventKind::Complete, CLEANUP).build())
        .build();
    let h = Harness::start(only_complete, &[CLEANUP]).await;
    assert!(!h.plugin.router().has_pre_removed_handler());
    assert_eq!(h.bus.subscriber_count(NotificationName::PreItemRemoved), 0);

    let h = Harness::start(removal_config(), &[CLEANUP]).await;
    assert!(h.plugin.router().has_pre_removed_handler());
    assert_eq!(h.bus.subscriber_count(NotificationName::PreItemRemoved), 1);
}

#[test]
fn cache_take_evicts_and_reports_missing_entries() {
    let registry = MemoryItemRegistry::new();
    registry.insert(
        "id1",
        ItemBuilder::new("Name").moved_to("/done").label("l").build(),
    );

    let mut cache = PreRemovalCache::new();
    cache.on_pre_removed(&registry, "id1").unwrap();
    assert_eq!(cache.len(), 1);

    let snapshot = cache.take("id1").unwrap();
    assert_eq!(
        snapshot,
        Snapshot {
            item_id: "id1".into(),
            name: "Name".into(),
            download_location: "/done".into(),
            label: "l".into(),
        }
    );
    assert!(cache.is_empty());
    assert!(matches!(
        cache.take("id1"),
        Err(ExecHookError::SnapshotNotFound(_))
    ));
}

#[test]
fn pre_removal_of_unknown_item_is_an_error() {
    let registry = MemoryItemRegistry::new();
    let mut cache = PreRemovalCache::new();

    let err = cache.on_pre_removed(&registry, "nope").unwrap_err();
    assert!(matches!(err, ExecHookError::ItemNotFound(_)));
    assert!(cache.is_empty());
}
