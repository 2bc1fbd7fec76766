use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use exechook::errors::Result;
use exechook::exec::{ExecutorBackend, ScriptInvocation};
use exechook::host::BoxFuture;

/// What the fake executor was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Script(ScriptInvocation),
    Url(String),
}

/// A fake executor that:
/// - records every script launch and URL fetch, in order
/// - optionally fails them, to exercise the error paths
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let fake = Self::default();
        *fake.fail.lock().unwrap() = true;
        fake
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn scripts(&self) -> Vec<ScriptInvocation> {
        self.invocations()
            .into_iter()
            .filter_map(|i| match i {
                Invocation::Script(s) => Some(s),
                Invocation::Url(_) => None,
            })
            .collect()
    }

    pub fn urls(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter_map(|i| match i {
                Invocation::Url(u) => Some(u),
                Invocation::Script(_) => None,
            })
            .collect()
    }

    /// Command ids of recorded script launches.
    pub fn launched_ids(&self) -> Vec<String> {
        self.scripts().into_iter().map(|s| s.command_id).collect()
    }

    fn record(&self, invocation: Invocation) -> Result<()> {
        self.invocations.lock().unwrap().push(invocation);
        if *self.fail.lock().unwrap() {
            return Err(anyhow!("fake executor configured to fail").into());
        }
        Ok(())
    }
}

impl ExecutorBackend for FakeExecutor {
    fn launch_script(&self, invocation: ScriptInvocation) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.record(Invocation::Script(invocation)) })
    }

    fn fetch_url(&self, url: String) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.record(Invocation::Url(url)) })
    }
}
