// tests/config_loading.rs

use std::sync::Arc;

use exechook::config::{parse_and_validate, Persistence, TomlPersistence};
use exechook::errors::ExecHookError;
use exechook::fs::mock::MockFileSystem;
use exechook::types::{CommandType, EventKind};
use exechook_test_utils::builders::{CommandRecordBuilder, ConfigFileBuilder};
use tempfile::TempDir;

#[test]
fn parses_full_and_minimal_records() {
    let cfg = parse_and_validate(
        r#"
[[commands]]
id = "a1"
event = "complete"
command = "/bin/notify <id> \"<na>\""
type = "url"
label = "Movies"
delay = "30"

[[commands]]
id = "b2"
event = "removed"
command = "/bin/cleanup <id>"
"#,
    )
    .unwrap();

    let commands = cfg.commands();
    assert_eq!(commands.len(), 2);

    assert_eq!(commands[0].id, "a1");
    assert_eq!(commands[0].event, EventKind::Complete);
    assert_eq!(commands[0].command, "/bin/notify <id> \"<na>\"");
    assert_eq!(commands[0].command_type, CommandType::Url);
    assert_eq!(commands[0].label, "Movies");
    assert_eq!(commands[0].delay, "30");

    assert_eq!(commands[1].event, EventKind::Removed);
    assert_eq!(commands[1].command_type, CommandType::Script);
    assert_eq!(commands[1].label, "");
    assert_eq!(commands[1].delay, "");
}

#[test]
fn command_type_defaults_to_script() {
    assert_eq!(CommandType::default(), CommandType::Script);
}

#[test]
fn empty_document_means_no_commands() {
    assert!(parse_and_validate("").unwrap().commands().is_empty());
}

#[test]
fn duplicate_ids_are_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_command(CommandRecordBuilder::new("same", EventKind::Complete, "/a").build())
        .with_command(CommandRecordBuilder::new("same", EventKind::Copied, "/b").build())
        .build_raw();

    let err = exechook::config::ConfigFile::try_from(raw).unwrap_err();
    assert!(matches!(err, ExecHookError::ConfigError(ref msg) if msg.contains("same")));
}

#[test]
fn blank_id_is_rejected() {
    let err = parse_and_validate(
        r#"
[[commands]]
id = "  "
event = "complete"
command = "/a"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ExecHookError::ConfigError(_)));
}

#[test]
fn unknown_event_or_type_fails_to_parse() {
    let bad_event = r#"
[[commands]]
id = "x"
event = "finished"
command = "/a"
"#;
    assert!(matches!(
        parse_and_validate(bad_event),
        Err(ExecHookError::TomlError(_))
    ));

    let bad_type = r#"
[[commands]]
id = "x"
event = "copied"
command = "/a"
type = "shell"
"#;
    assert!(matches!(
        parse_and_validate(bad_type),
        Err(ExecHookError::TomlError(_))
    ));
}

#[test]
fn empty_command_line_is_accepted() {
    let cfg = parse_and_validate(
        r#"
[[commands]]
id = "x"
event = "added"
command = ""
"#,
    )
    .unwrap();
    assert_eq!(cfg.commands()[0].command, "");
}

#[test]
fn missing_store_file_loads_as_empty() {
    let persistence = TomlPersistence::new("/nowhere/execute.toml", Arc::new(MockFileSystem::new()));
    assert!(persistence.load().unwrap().commands().is_empty());
}

#[test]
fn corrupt_store_file_is_an_error() {
    let fs = MockFileSystem::new();
    fs.add_file("/c/execute.toml", "[[commands]\nid =");
    let persistence = TomlPersistence::new("/c/execute.toml", Arc::new(fs));

    assert!(matches!(persistence.load(), Err(ExecHookError::TomlError(_))));
}

#[test]
fn save_then_load_on_disk_preserves_order_and_fields() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("execute.toml");
    let persistence = TomlPersistence::at(&path);

    let cfg = ConfigFileBuilder::new()
        .with_command(
            CommandRecordBuilder::new("z", EventKind::Copied, "\"/my tools/x\" <na>")
                .label("Tv")
                .delay("3")
                .build(),
        )
        .with_command(
            CommandRecordBuilder::new("a", EventKind::Complete, "http://h/<id>&q=1")
                .url()
                .build(),
        )
        .build();

    persistence.save(&cfg).unwrap();
    assert!(path.is_file());
    assert!(!path.with_extension("tmp").exists());

    let loaded = persistence.load().unwrap();
    assert_eq!(loaded.commands(), cfg.commands());
}

#[test]
fn saved_document_uses_the_documented_keys() {
    let fs = MockFileSystem::new();
    let persistence = TomlPersistence::new("/s/execute.toml", Arc::new(fs.clone()));
    let cfg = ConfigFileBuilder::new()
        .with_command(
            CommandRecordBuilder::new("k", EventKind::Removed, "/bin/r")
                .url()
                .build(),
        )
        .build();

    persistence.save(&cfg).unwrap();
    let text = fs.contents("/s/execute.toml").unwrap();

    for needle in [
        "[[commands]]",
        "id = \"k\"",
        "event = \"removed\"",
        "type = \"url\"",
    ] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}

#[test]
fn write_failure_maps_to_persistence_error() {
    let fs = MockFileSystem::new();
    fs.set_fail_writes(true);
    let persistence = TomlPersistence::new("/s/execute.toml", Arc::new(fs));

    let err = persistence
        .save(&ConfigFileBuilder::new().build())
        .unwrap_err();
    assert!(matches!(err, ExecHookError::Persistence(_)));
}
