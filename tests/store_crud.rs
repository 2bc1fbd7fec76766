// tests/store_crud.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use exechook::engine::Mutation;
use exechook::errors::ExecHookError;
use exechook::host::{BoxFuture, EventBus, Handler, Notification};
use exechook::types::{CommandType, EventKind, NotificationName};
use exechook_test_utils::builders::{CommandRecordBuilder, ConfigFileBuilder};
use exechook_test_utils::{init_tracing, Harness};

/// Collects every notification delivered under `name`.
fn record_notifications(bus: &dyn EventBus, name: NotificationName) -> Arc<Mutex<Vec<Notification>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler: Handler = Arc::new(move |n: Notification| -> BoxFuture<'static, ()> {
        sink.lock().unwrap().push(n);
        Box::pin(async {})
    });
    bus.subscribe(name, handler);
    seen
}

#[tokio::test]
async fn add_command_round_trips_through_get_and_storage() {
    init_tracing();

    let h = Harness::empty().await;
    let added = record_notifications(h.bus.as_ref(), NotificationName::CommandAdded);

    let id = h
        .plugin
        .add_command(
            EventKind::Complete,
            "/opt/hooks/done <id>",
            CommandType::Script,
            "Movies",
            "10",
        )
        .await
        .unwrap();

    assert!(!id.is_empty());
    let commands = h.plugin.get_commands().await;
    assert_eq!(commands.len(), 1);
    let record = &commands[0];
    assert_eq!(record.id, id);
    assert_eq!(record.event, EventKind::Complete);
    assert_eq!(record.command, "/opt/hooks/done <id>");
    assert_eq!(record.command_type, CommandType::Script);
    assert_eq!(record.label, "Movies");
    assert_eq!(record.delay, "10");

    assert_eq!(h.persisted().commands(), commands.as_slice());

    let added = added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(
        added[0],
        Notification::CommandAdded {
            record: record.clone()
        }
    );
}

#[tokio::test]
async fn generated_ids_are_unique() {
    init_tracing();

    let h = Harness::empty().await;
    let mut ids = HashSet::new();
    for i in 0..50 {
        let id = h
            .plugin
            .add_command(EventKind::Copied, format!("/bin/true {i}"), CommandType::Script, "", "")
            .await
            .unwrap();
        assert!(ids.insert(id), "duplicate id generated");
    }
    assert_eq!(h.plugin.get_commands().await.len(), 50);
}

#[tokio::test]
async fn add_registers_a_handler_for_a_new_event() {
    init_tracing();

    let h = Harness::empty().await;
    assert!(h.plugin.router().registered_events().is_empty());

    h.plugin
        .add_command(EventKind::Removed, "/bin/true", CommandType::Script, "", "")
        .await
        .unwrap();

    assert_eq!(h.plugin.router().registered_events(), vec![EventKind::Removed]);
    assert_eq!(h.bus.subscriber_count(NotificationName::ItemRemoved), 1);
    assert_eq!(h.bus.subscriber_count(NotificationName::PreItemRemoved), 1);
}

#[tokio::test]
async fn remove_unknown_id_is_a_silent_no_op() {
    init_tracing();

    let config = ConfigFileBuilder::new()
        .with_command(CommandRecordBuilder::new("keep", EventKind::Complete, "/bin/true").build())
        .build();
    let h = Harness::start(config, &[]).await;
    let removed = record_notifications(h.bus.as_ref(), NotificationName::CommandRemoved);

    let outcome = h.plugin.remove_command("does-not-exist").await.unwrap();

    assert_eq!(outcome, Mutation::NotFound);
    assert_eq!(h.plugin.get_commands().await.len(), 1);
    assert_eq!(h.persisted().commands().len(), 1);
    assert!(removed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn remove_deletes_the_record_and_notifies() {
    init_tracing();

    let config = ConfigFileBuilder::new()
        .with_command(CommandRecordBuilder::new("a", EventKind::Complete, "/bin/a").build())
        .with_command(CommandRecordBuilder::new("b", EventKind::Complete, "/bin/b").build())
        .build();
    let h = Harness::start(config, &[]).await;
    let removed = record_notifications(h.bus.as_ref(), NotificationName::CommandRemoved);

    assert_eq!(h.plugin.remove_command("a").await.unwrap(), Mutation::Applied);

    let ids: Vec<_> = h.plugin.get_commands().await.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["b"]);
    assert_eq!(h.persisted().commands().len(), 1);
    assert_eq!(
        *removed.lock().unwrap(),
        vec![Notification::CommandRemoved {
            command_id: "a".into()
        }]
    );
}

#[tokio::test]
async fn save_command_keeps_type_label_and_delay() {
    init_tracing();

    let config = ConfigFileBuilder::new()
        .with_command(
            CommandRecordBuilder::new("u", EventKind::Complete, "http://old.test/<id>")
                .url()
                .label("Books")
                .delay("7")
                .build(),
        )
        .build();
    let h = Harness::start(config, &[]).await;

    let outcome = h
        .plugin
        .save_command("u", EventKind::Copied, "http://new.test/<na>")
        .await
        .unwrap();
    assert_eq!(outcome, Mutation::Applied);

    let record = h.plugin.get_commands().await.remove(0);
    assert_eq!(record.id, "u");
    assert_eq!(record.event, EventKind::Copied);
    assert_eq!(record.command, "http://new.test/<na>");
    assert_eq!(record.command_type, CommandType::Url);
    assert_eq!(record.label, "Books");
    assert_eq!(record.delay, "7");
    assert_eq!(h.persisted().commands()[0], record);

    assert_eq!(
        h.plugin
            .save_command("missing", EventKind::Copied, "x")
            .await
            .unwrap(),
        Mutation::NotFound
    );
}

#[tokio::test]
async fn failed_write_is_reported_and_rolled_back() {
    init_tracing();

    let config = ConfigFileBuilder::new()
        .with_command(CommandRecordBuilder::new("a", EventKind::Complete, "/bin/a").build())
        .build();
    let h = Harness::start(config, &[]).await;
    h.fs.set_fail_writes(true);

    let err = h
        .plugin
        .add_command(EventKind::Complete, "/bin/b", CommandType::Script, "", "")
        .await
        .unwrap_err();
    assert!(matches!(err, ExecHookError::Persistence(_)));

    let err = h.plugin.remove_command("a").await.unwrap_err();
    assert!(matches!(err, ExecHookError::Persistence(_)));

    let err = h
        .plugin
        .save_command("a", EventKind::Copied, "/bin/c")
        .await
        .unwrap_err();
    assert!(matches!(err, ExecHookError::Persistence(_)));

    let commands = h.plugin.get_commands().await;
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].command, "/bin/a");
    assert_eq!(commands[0].event, EventKind::Complete);
    assert_eq!(h.persisted().commands(), commands.as_slice());
}
