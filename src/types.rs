use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle event a command can be bound to.
///
/// Stored in the config file as its lowercase name (`"complete"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Added,
    Complete,
    Removed,
    Copied,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Added,
        EventKind::Complete,
        EventKind::Removed,
        EventKind::Copied,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Added => "added",
            EventKind::Complete => "complete",
            EventKind::Removed => "removed",
            EventKind::Copied => "copied",
        }
    }

    /// Bus notification that fires this event.
    pub fn notification(self) -> NotificationName {
        match self {
            EventKind::Added => NotificationName::ItemAdded,
            EventKind::Complete => NotificationName::ItemFinished,
            EventKind::Removed => NotificationName::ItemRemoved,
            EventKind::Copied => NotificationName::ItemCopied,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "added" => Ok(EventKind::Added),
            "complete" => Ok(EventKind::Complete),
            "removed" => Ok(EventKind::Removed),
            "copied" => Ok(EventKind::Copied),
            other => Err(format!(
                "invalid event: {other} (expected \"added\", \"complete\", \"removed\" or \"copied\")"
            )),
        }
    }
}

/// How a command line is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Launch a local executable.
    #[default]
    Script,
    /// Issue a GET request against the whole command line.
    Url,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandType::Script => f.write_str("script"),
            CommandType::Url => f.write_str("url"),
        }
    }
}

impl FromStr for CommandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "script" => Ok(CommandType::Script),
            "url" => Ok(CommandType::Url),
            other => Err(format!(
                "invalid command type: {other} (expected \"script\" or \"url\")"
            )),
        }
    }
}

/// Names of the notifications carried by the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationName {
    ItemAdded,
    ItemFinished,
    ItemRemoved,
    ItemCopied,
    PreItemRemoved,
    CommandAdded,
    CommandRemoved,
}

impl NotificationName {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationName::ItemAdded => "ItemAdded",
            NotificationName::ItemFinished => "ItemFinished",
            NotificationName::ItemRemoved => "ItemRemoved",
            NotificationName::ItemCopied => "ItemCopied",
            NotificationName::PreItemRemoved => "PreItemRemoved",
            NotificationName::CommandAdded => "ExecuteCommandAdded",
            NotificationName::CommandRemoved => "ExecuteCommandRemoved",
        }
    }
}

impl fmt::Display for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
