// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The pipeline talks to an `ExecutorBackend` instead of spawning processes
//! or opening connections itself. This makes it easy to swap in a fake
//! executor in tests while keeping the production implementation here.
//!
//! - `RealExecutorBackend` launches scripts with `tokio::process` and fetches
//!   URLs with `reqwest`.
//! - Tests can provide their own `ExecutorBackend` that records what would
//!   have been launched.

use std::mem;
use std::sync::{Mutex, PoisonError};

use reqwest::Client;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::errors::Result;
use crate::host::BoxFuture;

use super::fetch::fetch_url;
use super::task_runner::{spawn_script, watch_script, ScriptInvocation};

/// Trait abstracting how a resolved command is carried out.
pub trait ExecutorBackend: Send + Sync {
    /// Start the script. Resolves as soon as the process is running; its
    /// completion is observed in the background.
    fn launch_script(&self, invocation: ScriptInvocation) -> BoxFuture<'_, Result<()>>;

    /// Perform one GET request and resolve when the response has been read.
    fn fetch_url(&self, url: String) -> BoxFuture<'_, Result<()>>;
}

/// Real executor backend used in production.
pub struct RealExecutorBackend {
    client: Client,
    watchers: Mutex<JoinSet<()>>,
}

impl std::fmt::Debug for RealExecutorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealExecutorBackend").finish_non_exhaustive()
    }
}

impl Default for RealExecutorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RealExecutorBackend {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            watchers: Mutex::new(JoinSet::new()),
        }
    }

    /// Number of launched scripts whose completion has not been observed yet.
    pub fn in_flight(&self) -> usize {
        let mut watchers = self.watchers.lock().unwrap_or_else(PoisonError::into_inner);
        while watchers.try_join_next().is_some() {}
        watchers.len()
    }

    /// Watcher tasks currently held, finished or not.
    pub fn tracked_watchers(&self) -> usize {
        self.watchers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Wait until every script launched so far has exited and been logged.
    pub async fn drain(&self) {
        let mut watchers = {
            let mut guard = self.watchers.lock().unwrap_or_else(PoisonError::into_inner);
            mem::take(&mut *guard)
        };
        let pending = watchers.len();
        if pending > 0 {
            info!(pending, "waiting for launched scripts to finish");
        }
        while watchers.join_next().await.is_some() {}
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn launch_script(&self, invocation: ScriptInvocation) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let child = spawn_script(&invocation)?;
            debug!(command_id = %invocation.command_id, pid = ?child.id(), "script launched");
            let mut watchers = self.watchers.lock().unwrap_or_else(PoisonError::into_inner);
            // Reap finished watchers so the set only holds running scripts.
            while watchers.try_join_next().is_some() {}
            watchers.spawn(watch_script(child, invocation));
            Ok(())
        })
    }

    fn fetch_url(&self, url: String) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let status = fetch_url(&self.client, &url).await?;
            info!(url = %url, status, "URL fetched");
            Ok(())
        })
    }
}
