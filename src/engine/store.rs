// src/engine/store.rs

//! Ordered, persisted collection of command records.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use blake3::Hasher;
use tracing::{debug, info};

use crate::config::{CommandRecord, ConfigFile, Persistence};
use crate::errors::Result;
use crate::types::{CommandType, EventKind};

/// Result of a CRUD call that targets an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// No record with that id; nothing changed.
    NotFound,
}

/// Fields of a record that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub event: EventKind,
    pub command: String,
    pub command_type: CommandType,
    pub label: String,
    pub delay: String,
}

/// In-memory command list plus the persistence it is mirrored to.
///
/// Every mutation is saved before it returns. If the save fails the
/// in-memory change is rolled back, so memory and storage never diverge.
#[derive(Debug)]
pub struct CommandStore {
    config: ConfigFile,
    persistence: Arc<dyn Persistence>,
}

impl CommandStore {
    pub fn load(persistence: Arc<dyn Persistence>) -> Result<Self> {
        let config = persistence.load()?;
        debug!(commands = config.commands().len(), "command store loaded");
        Ok(Self {
            config,
            persistence,
        })
    }

    pub fn records(&self) -> &[CommandRecord] {
        self.config.commands()
    }

    pub fn get(&self, id: &str) -> Option<&CommandRecord> {
        self.records().iter().find(|r| r.id == id)
    }

    /// Distinct events, in order of first appearance.
    pub fn events(&self) -> Vec<EventKind> {
        let mut seen = HashSet::new();
        self.records()
            .iter()
            .map(|r| r.event)
            .filter(|e| seen.insert(*e))
            .collect()
    }

    /// Records bound to `event` whose label equals `label` ignoring case,
    /// in store order.
    pub fn matching(&self, event: EventKind, label: &str) -> Vec<CommandRecord> {
        self.records()
            .iter()
            .filter(|r| r.matches(event, label))
            .cloned()
            .collect()
    }

    pub fn add(&mut self, new: NewCommand) -> Result<CommandRecord> {
        let id = loop {
            let candidate = new_command_id();
            if self.get(&candidate).is_none() {
                break candidate;
            }
        };
        let record = CommandRecord {
            id,
            event: new.event,
            command: new.command,
            command_type: new.command_type,
            label: new.label,
            delay: new.delay,
        };

        self.config.commands_mut().push(record.clone());
        if let Err(err) = self.save() {
            self.config.commands_mut().pop();
            return Err(err);
        }
        info!(command_id = %record.id, event = %record.event, "command added");
        Ok(record)
    }

    /// Remove the first record with `id`. The store is saved either way.
    pub fn remove(&mut self, id: &str) -> Result<Mutation> {
        let Some(idx) = self.records().iter().position(|r| r.id == id) else {
            self.save()?;
            debug!(command_id = %id, "remove: no such command");
            return Ok(Mutation::NotFound);
        };

        let removed = self.config.commands_mut().remove(idx);
        if let Err(err) = self.save() {
            self.config.commands_mut().insert(idx, removed);
            return Err(err);
        }
        info!(command_id = %id, "command removed");
        Ok(Mutation::Applied)
    }

    /// Replace event and command text of record `id`, keeping its type,
    /// label and delay. The store is saved either way.
    pub fn update(&mut self, id: &str, event: EventKind, command: String) -> Result<Mutation> {
        let Some(idx) = self.records().iter().position(|r| r.id == id) else {
            self.save()?;
            debug!(command_id = %id, "save: no such command");
            return Ok(Mutation::NotFound);
        };

        let previous = self.config.commands()[idx].clone();
        self.config.commands_mut()[idx] = CommandRecord {
            event,
            command,
            ..previous.clone()
        };
        if let Err(err) = self.save() {
            self.config.commands_mut()[idx] = previous;
            return Err(err);
        }
        info!(command_id = %id, event = %event, "command updated");
        Ok(Mutation::Applied)
    }

    pub fn save(&self) -> Result<()> {
        self.persistence.save(&self.config)
    }
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Content-independent id: blake3 over the creation time and a process-wide
/// counter, hex encoded.
pub fn new_command_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Hasher::new();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&seq.to_le_bytes());
    hasher.update(&std::process::id().to_le_bytes());
    hasher.finalize().to_hex().to_string()
}
