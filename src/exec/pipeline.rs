// src/exec/pipeline.rs

//! Per-command execution pipeline:
//! delay → substitution → tokenization → script launch or URL fetch.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::CommandRecord;
use crate::fs::FileSystem;
use crate::types::CommandType;

use super::backend::ExecutorBackend;
use super::expand::{escape_ampersand, expand_executable, needs_ampersand_escape};
use super::substitute::SubstitutionContext;
use super::task_runner::ScriptInvocation;
use super::tokenize::{split_arguments, CommandLine};

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Script process started; its exit is logged asynchronously.
    Launched,
    /// URL request completed.
    Fetched,
    /// Script rejected before launch (missing or not executable).
    Rejected(String),
    /// Spawn or network failure.
    Failed(String),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Launched | CommandOutcome::Fetched)
    }
}

/// Script launch parameters after substitution, tokenization and expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedScript {
    pub executable: String,
    pub args: Vec<String>,
}

/// Resolve the executable and argv for a substituted script command line.
pub fn prepare_script(line: &str) -> PreparedScript {
    let parsed = CommandLine::parse(line);
    debug!(
        exe = %parsed.executable,
        args = %parsed.arguments,
        "command processed"
    );

    let executable = expand_executable(parsed.unquoted_executable());
    let args = split_arguments(&parsed.arguments);
    PreparedScript { executable, args }
}

pub struct Pipeline {
    backend: Arc<dyn ExecutorBackend>,
    fs: Arc<dyn FileSystem>,
}

impl Pipeline {
    pub fn new(backend: Arc<dyn ExecutorBackend>, fs: Arc<dyn FileSystem>) -> Self {
        Self { backend, fs }
    }

    /// Run one matched command. Never fails: every problem is logged and
    /// reported through the returned outcome.
    pub async fn run(&self, record: &CommandRecord, ctx: &SubstitutionContext) -> CommandOutcome {
        match record.delay_duration() {
            Some(delay) => {
                debug!(command_id = %record.id, secs = delay.as_secs(), "delaying command");
                tokio::time::sleep(delay).await;
            }
            None => {
                debug!(command_id = %record.id, delay = %record.delay, "no delay");
            }
        }

        debug!(command_id = %record.id, raw = %record.command, "raw command");
        let line = ctx.substitute(&record.command);

        match record.command_type {
            CommandType::Script => self.run_script(record, &line).await,
            CommandType::Url => self.run_url(record, line).await,
        }
    }

    async fn run_script(&self, record: &CommandRecord, line: &str) -> CommandOutcome {
        let PreparedScript {
            mut executable,
            mut args,
        } = prepare_script(line);

        if !self.fs.is_executable(&PathBuf::from(&executable)) {
            error!(
                command_id = %record.id,
                exe = %executable,
                "script not found or not executable"
            );
            return CommandOutcome::Rejected(format!(
                "script not found or not executable: {executable}"
            ));
        }

        if needs_ampersand_escape() {
            executable = escape_ampersand(&executable);
            args = args.iter().map(|a| escape_ampersand(a)).collect();
        }

        let invocation = ScriptInvocation {
            command_id: record.id.clone(),
            executable: PathBuf::from(executable),
            args,
        };

        match self.backend.launch_script(invocation).await {
            Ok(()) => CommandOutcome::Launched,
            Err(err) => {
                error!(command_id = %record.id, error = %err, "failed to launch script");
                CommandOutcome::Failed(err.to_string())
            }
        }
    }

    async fn run_url(&self, record: &CommandRecord, url: String) -> CommandOutcome {
        info!(command_id = %record.id, url = %url, "calling URL");
        match self.backend.fetch_url(url).await {
            Ok(()) => CommandOutcome::Fetched,
            Err(err) => {
                error!(command_id = %record.id, error = %format!("{err:#}"), "URL call failed");
                CommandOutcome::Failed(err.to_string())
            }
        }
    }
}
