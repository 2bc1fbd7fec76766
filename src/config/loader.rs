// src/config/loader.rs

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ExecHookError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Environment variable that overrides the default store location.
pub const CONFIG_ENV: &str = "EXECHOOK_CONFIG";

/// Durable home of the command store.
///
/// `load` returns the schema defaults when nothing has been saved yet;
/// `save` must not return before the contents are durable.
pub trait Persistence: Send + Sync + Debug {
    fn load(&self) -> Result<ConfigFile>;
    fn save(&self, config: &ConfigFile) -> Result<()>;
}

/// TOML file persistence over a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct TomlPersistence {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl TomlPersistence {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// Persistence backed by the real filesystem.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Arc::new(RealFileSystem))
    }
}

impl Persistence for TomlPersistence {
    fn load(&self) -> Result<ConfigFile> {
        if !self.fs.exists(&self.path) {
            debug!(path = ?self.path, "no store file yet; using defaults");
            return Ok(ConfigFile::default());
        }
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| ExecHookError::Persistence(format!("{e:#}")))?;
        parse_and_validate(&contents)
    }

    fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config)?;
        self.fs
            .write(&self.path, contents.as_bytes())
            .map_err(|e| ExecHookError::Persistence(format!("{e:#}")))?;
        debug!(path = ?self.path, commands = config.commands().len(), "store saved");
        Ok(())
    }
}

/// Parse TOML store contents and run validation.
pub fn parse_and_validate(contents: &str) -> Result<ConfigFile> {
    let raw: RawConfigFile = toml::from_str(contents)?;
    ConfigFile::try_from(raw)
}

/// Load and validate a store file from disk.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    parse_and_validate(&contents)
}

/// Store location when `--config` is not given: `EXECHOOK_CONFIG`, else
/// `execute.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("execute.toml"))
}
