// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Vec<u8>,
    pub executable: bool,
}

/// In-memory filesystem for tests.
///
/// Clones share the same backing map, so a test can keep a handle and inspect
/// what the code under test wrote.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.insert(path.as_ref(), content.into(), false);
    }

    pub fn add_executable(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), b"#!/bin/sh\n".to_vec(), true);
    }

    /// Make every subsequent `write` fail (simulates a read-only disk).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let files = self.files.lock().unwrap();
        files
            .get(path.as_ref())
            .map(|e| String::from_utf8_lossy(&e.content).into_owned())
    }

    fn insert(&self, path: &Path, content: Vec<u8>, executable: bool) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), MockEntry { content, executable });
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(entry) => String::from_utf8(entry.content.clone())
                .map_err(|e| anyhow!("Invalid UTF-8: {}", e)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("write refused for {:?}", path);
        }
        self.insert(path, contents.to_vec(), false);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.get(path).is_some_and(|e| e.executable)
    }
}
