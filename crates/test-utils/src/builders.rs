#![allow(dead_code)]

use exechook::config::{CommandRecord, ConfigFile, RawConfigFile};
use exechook::host::ItemInfo;
use exechook::types::{CommandType, EventKind};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_command(mut self, record: CommandRecord) -> Self {
        self.config.commands.push(record);
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CommandRecord`.
pub struct CommandRecordBuilder {
    record: CommandRecord,
}

impl CommandRecordBuilder {
    pub fn new(id: &str, event: EventKind, command: &str) -> Self {
        Self {
            record: CommandRecord {
                id: id.to_string(),
                event,
                command: command.to_string(),
                command_type: CommandType::Script,
                label: String::new(),
                delay: String::new(),
            },
        }
    }

    pub fn url(mut self) -> Self {
        self.record.command_type = CommandType::Url;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.record.label = label.to_string();
        self
    }

    pub fn delay(mut self, delay: &str) -> Self {
        self.record.delay = delay.to_string();
        self
    }

    pub fn build(self) -> CommandRecord {
        self.record
    }
}

/// Builder for `ItemInfo`.
pub struct ItemBuilder {
    info: ItemInfo,
}

impl ItemBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            info: ItemInfo {
                name: name.to_string(),
                save_path: "/downloads".to_string(),
                ..ItemInfo::default()
            },
        }
    }

    pub fn save_path(mut self, path: &str) -> Self {
        self.info.save_path = path.to_string();
        self
    }

    pub fn moved_to(mut self, path: &str) -> Self {
        self.info.move_on_completed = true;
        self.info.move_on_completed_path = path.to_string();
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.info.label = label.to_string();
        self
    }

    pub fn build(self) -> ItemInfo {
        self.info
    }
}
