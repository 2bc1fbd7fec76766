// src/engine/cache.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{ExecHookError, Result};
use crate::exec::SubstitutionContext;
use crate::host::{fields, ItemRegistry};

/// Item metadata captured just before the item is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub item_id: String,
    pub name: String,
    pub download_location: String,
    pub label: String,
}

impl Snapshot {
    pub fn into_context(self) -> SubstitutionContext {
        SubstitutionContext {
            id: self.item_id,
            name: self.name,
            download_location: self.download_location,
            label: self.label,
        }
    }
}

/// Snapshots keyed by item id. Each entry is written on the pre-removal
/// notification and consumed exactly once by the removal dispatch.
///
/// Memory only: a removal spanning a restart loses its snapshot.
#[derive(Debug, Default)]
pub struct PreRemovalCache {
    entries: HashMap<String, Snapshot>,
}

impl PreRemovalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look the item up while it still exists and remember it.
    pub fn on_pre_removed(&mut self, registry: &dyn ItemRegistry, item_id: &str) -> Result<()> {
        let status = registry.status(
            item_id,
            &[fields::NAME, fields::DOWNLOAD_LOCATION, fields::LABEL],
        )?;

        let snapshot = Snapshot {
            item_id: item_id.to_string(),
            name: status.text(fields::NAME)?.to_string(),
            download_location: status.text(fields::DOWNLOAD_LOCATION)?.to_string(),
            label: status.text(fields::LABEL)?.to_string(),
        };
        debug!(item_id, name = %snapshot.name, "pre-removal snapshot stored");
        self.insert(snapshot);
        Ok(())
    }

    pub fn insert(&mut self, snapshot: Snapshot) {
        self.entries.insert(snapshot.item_id.clone(), snapshot);
    }

    /// Remove and return the snapshot for `item_id`.
    pub fn take(&mut self, item_id: &str) -> Result<Snapshot> {
        self.entries
            .remove(item_id)
            .ok_or_else(|| ExecHookError::SnapshotNotFound(item_id.to_string()))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.entries.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
