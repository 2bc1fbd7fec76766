// src/host/registry.rs

//! Item registry interface: read access to the metadata of tracked items.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::errors::{ExecHookError, Result};

/// Status field names understood by the dispatcher.
pub mod fields {
    pub const NAME: &str = "name";
    pub const SAVE_PATH: &str = "save_path";
    pub const MOVE_ON_COMPLETED: &str = "move_on_completed";
    pub const MOVE_ON_COMPLETED_PATH: &str = "move_on_completed_path";
    pub const DOWNLOAD_LOCATION: &str = "download_location";
    pub const LABEL: &str = "label";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Text(String),
    Flag(bool),
}

/// Field map returned by [`ItemRegistry::status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStatus {
    item_id: String,
    values: BTreeMap<String, StatusValue>,
}

impl ItemStatus {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: StatusValue) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: StatusValue) {
        self.values.insert(field.to_string(), value);
    }

    pub fn text(&self, field: &str) -> Result<&str> {
        match self.values.get(field) {
            Some(StatusValue::Text(s)) => Ok(s),
            Some(StatusValue::Flag(_)) => Err(self.field_type(field)),
            None => Err(self.field_missing(field)),
        }
    }

    pub fn flag(&self, field: &str) -> Result<bool> {
        match self.values.get(field) {
            Some(StatusValue::Flag(b)) => Ok(*b),
            Some(StatusValue::Text(_)) => Err(self.field_type(field)),
            None => Err(self.field_missing(field)),
        }
    }

    fn field_missing(&self, field: &str) -> ExecHookError {
        ExecHookError::FieldMissing {
            item_id: self.item_id.clone(),
            field: field.to_string(),
        }
    }

    fn field_type(&self, field: &str) -> ExecHookError {
        ExecHookError::FieldType {
            item_id: self.item_id.clone(),
            field: field.to_string(),
        }
    }
}

/// Host item registry.
///
/// Lookups are synchronous: the pre-removal snapshot has to be taken while
/// the host is still holding the item.
pub trait ItemRegistry: Send + Sync {
    /// Requested fields that the item does not have are simply absent from
    /// the returned status. An unknown item is `ItemNotFound`.
    fn status(&self, item_id: &str, fields: &[&str]) -> Result<ItemStatus>;
}

/// Metadata kept by [`MemoryItemRegistry`] for one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: String,
    pub save_path: String,
    pub move_on_completed: bool,
    pub move_on_completed_path: String,
    pub label: String,
}

impl ItemInfo {
    /// Where the payload currently lives.
    pub fn download_location(&self) -> &str {
        if self.move_on_completed {
            &self.move_on_completed_path
        } else {
            &self.save_path
        }
    }

    fn field(&self, field: &str) -> Option<StatusValue> {
        let text = |s: &str| Some(StatusValue::Text(s.to_string()));
        match field {
            fields::NAME => text(&self.name),
            fields::SAVE_PATH => text(&self.save_path),
            fields::MOVE_ON_COMPLETED => Some(StatusValue::Flag(self.move_on_completed)),
            fields::MOVE_ON_COMPLETED_PATH => text(&self.move_on_completed_path),
            fields::DOWNLOAD_LOCATION => text(self.download_location()),
            fields::LABEL => text(&self.label),
            _ => None,
        }
    }
}

/// In-process registry used by the binary and by tests.
#[derive(Debug, Default)]
pub struct MemoryItemRegistry {
    items: RwLock<HashMap<String, ItemInfo>>,
}

impl MemoryItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item_id: impl Into<String>, info: ItemInfo) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item_id.into(), info);
    }

    pub fn remove(&self, item_id: &str) -> Option<ItemInfo> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(item_id)
    }

    /// Relabel an item; returns `false` if it is unknown.
    pub fn set_label(&self, item_id: &str, label: impl Into<String>) -> bool {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        match items.get_mut(item_id) {
            Some(info) => {
                info.label = label.into();
                true
            }
            None => false,
        }
    }
}

impl ItemRegistry for MemoryItemRegistry {
    fn status(&self, item_id: &str, fields: &[&str]) -> Result<ItemStatus> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let info = items
            .get(item_id)
            .ok_or_else(|| ExecHookError::ItemNotFound(item_id.to_string()))?;

        let mut status = ItemStatus::new(item_id);
        for field in fields {
            if let Some(value) = info.field(field) {
                status.insert(field, value);
            }
        }
        Ok(status)
    }
}
