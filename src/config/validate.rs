// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ExecHookError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ExecHookError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.commands))
    }
}

/// Semantic checks on a freshly parsed store.
///
/// `event` and `type` values are already enforced by deserialization;
/// command lines are deliberately left unchecked.
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_ids(cfg)?;
    Ok(())
}

fn validate_ids(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, record) in cfg.commands.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(ExecHookError::ConfigError(format!(
                "command #{idx} has an empty id"
            )));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(ExecHookError::ConfigError(format!(
                "duplicate command id '{}'",
                record.id
            )));
        }
    }
    Ok(())
}
