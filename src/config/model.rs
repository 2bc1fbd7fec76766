// src/config/model.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{CommandType, EventKind};

/// Store file as read from TOML, before validation.
///
/// ```toml
/// [[commands]]
/// id = "5b0e…"
/// event = "complete"
/// command = "/home/me/bin/notify.sh <id> \"<na>\" <dl>"
/// type = "script"
/// label = "movies"
/// delay = "30"
/// ```
///
/// A missing `commands` array is the schema default (no commands).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub commands: Vec<CommandRecord>,
}

/// Validated store contents.
///
/// Construct through `ConfigFile::try_from(raw)` (see `validate.rs`), which
/// guarantees ids are non-empty and unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigFile {
    commands: Vec<CommandRecord>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(commands: Vec<CommandRecord>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }

    pub(crate) fn commands_mut(&mut self) -> &mut Vec<CommandRecord> {
        &mut self.commands
    }
}

/// One stored command configuration.
///
/// Records are replaced wholesale on update, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandRecord {
    /// Opaque, creation-time identifier.
    pub id: String,

    /// Lifecycle event that triggers this command.
    pub event: EventKind,

    /// Raw command line (or URL) with `<id>`, `<na>`, `<dl>`, `<lb>`
    /// placeholders.
    pub command: String,

    #[serde(rename = "type", default)]
    pub command_type: CommandType,

    /// Case-insensitive label filter. Empty only matches unlabelled items.
    #[serde(default)]
    pub label: String,

    /// Seconds to wait before executing. Anything that is not a plain
    /// non-negative integer means "no delay".
    #[serde(default)]
    pub delay: String,
}

impl CommandRecord {
    /// Whether this record applies to `event` on an item labelled `label`.
    pub fn matches(&self, event: EventKind, label: &str) -> bool {
        self.event == event && self.label.to_uppercase() == label.to_uppercase()
    }

    /// Parsed pre-execution delay, `None` when the field is not all digits.
    pub fn delay_duration(&self) -> Option<Duration> {
        parse_delay(&self.delay)
    }
}

/// Digits-only delay strings become a duration in seconds; everything else
/// (empty, signed, fractional, words) means no delay. Values beyond `u64`
/// saturate.
pub fn parse_delay(delay: &str) -> Option<Duration> {
    if delay.is_empty() || !delay.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let secs = delay.parse::<u64>().unwrap_or(u64::MAX);
    Some(Duration::from_secs(secs))
}
